use nalgebra::Point2;
use otb_fen_board::{
    fen, BoardReader, BoardReaderParams, CollisionPolicy, FenTrailer, SquareLayout,
    SquareSelection, SquareSelectionParams,
};
use otb_fen_core::{BoardError, BoardOrientation, PieceDetection, Square, SquareDetection};

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Square centers of a board photographed slightly from above: rows shrink
/// towards the top of the frame and drift sideways a little.
fn camera_squares() -> Vec<SquareDetection> {
    let mut dets = Vec::new();
    for row in 0..8 {
        let pitch = 44.0 + 2.0 * row as f32;
        let y = 60.0 + row as f32 * (40.0 + 2.0 * row as f32);
        for col in 0..8 {
            let x = 120.0 - row as f32 * 3.0 + col as f32 * pitch;
            let conf = 0.6 + 0.005 * ((row * 8 + col) % 13) as f32;
            dets.push(SquareDetection::new(conf, Point2::new(x, y), "square"));
        }
    }
    // Detector order is unrelated to board order.
    (0..dets.len()).map(|i| dets[(i * 29) % dets.len()].clone()).collect()
}

fn start_position_pieces(layout: &SquareLayout) -> Vec<PieceDetection> {
    let back = ["Rook", "Knight", "Bishop", "Queen", "King", "Bishop", "Knight", "Rook"];
    let mut pieces = Vec::new();
    for (file, kind) in back.iter().enumerate() {
        for (rank, label) in [
            (0, format!("White{kind}")),
            (1, "WhitePawn".to_string()),
            (6, "BlackPawn".to_string()),
            (7, format!("Black{kind}")),
        ] {
            let square = Square::new(file, rank).unwrap();
            let c = layout.center(square);
            let jitter = ((file * 3 + rank) % 5) as f32 - 2.0;
            pieces.push(
                PieceDetection::new(Point2::new(c.x + jitter * 2.0, c.y - jitter * 3.0), label)
                    .with_confidence(0.8),
            );
        }
    }
    pieces
}

fn reader(orientation: BoardOrientation) -> BoardReader {
    BoardReader::new(BoardReaderParams {
        orientation,
        trailer: FenTrailer::full_castling(),
        ..BoardReaderParams::default()
    })
}

#[test]
fn reads_start_position_from_camera_frame() {
    init_logger();
    for orientation in [BoardOrientation::RightWhite, BoardOrientation::LeftWhite] {
        let reader = reader(orientation);
        let layout = reader.locate_squares(&camera_squares()).unwrap();
        let reading = reader
            .read_pieces(&layout, &start_position_pieces(&layout))
            .unwrap();
        assert_eq!(reading.fen, format!("{START} w KQkq - 0 1"), "{orientation}");
        assert_eq!(reading.board().piece_count(), 32);
        assert!(reading.assignment.collisions.is_empty());
    }
}

#[test]
fn right_white_puts_h8_top_left() {
    let layout = reader(BoardOrientation::RightWhite)
        .locate_squares(&camera_squares())
        .unwrap();
    // Top-left visual square: smallest row y, leftmost x.
    assert_eq!(layout.center("H8".parse().unwrap()), Point2::new(120.0, 60.0));
    let left = reader(BoardOrientation::LeftWhite)
        .locate_squares(&camera_squares())
        .unwrap();
    assert_eq!(left.center("A1".parse().unwrap()), Point2::new(120.0, 60.0));
}

#[test]
fn cached_layout_is_reused_across_piece_frames() {
    let reader = reader(BoardOrientation::RightWhite);
    let layout = reader.locate_squares(&camera_squares()).unwrap();

    let json = serde_json::to_string(&layout).unwrap();
    let cached: SquareLayout = serde_json::from_str(&json).unwrap();

    let e4 = cached.center("E4".parse().unwrap());
    let first = reader
        .read_pieces(&cached, &[PieceDetection::new(e4, "WhitePawn")])
        .unwrap();
    assert_eq!(first.fen, "8/8/8/8/4P3/8/8/8 w KQkq - 0 1");

    let e5 = cached.center("E5".parse().unwrap());
    let second = reader
        .read_pieces(
            &cached,
            &[
                PieceDetection::new(e4, "WhitePawn"),
                PieceDetection::new(e5, "BlackPawn"),
            ],
        )
        .unwrap();
    assert_eq!(fen::encode_placement(second.board()), "8/8/8/4p3/4P3/8/8/8");
}

#[test]
fn low_confidence_pieces_never_reach_the_board() {
    let reader = reader(BoardOrientation::LeftWhite);
    let layout = reader.locate_squares(&camera_squares()).unwrap();
    let d4 = layout.center("D4".parse().unwrap());
    let reading = reader
        .read_pieces(
            &layout,
            &[
                PieceDetection::new(d4, "WhiteQueen").with_confidence(0.3),
                // Filtered before parsing, so the bogus class is harmless.
                PieceDetection::new(d4, "Hand").with_confidence(0.1),
            ],
        )
        .unwrap();
    assert_eq!(reading.board().piece_count(), 0);
}

#[test]
fn overflowing_squares_need_top_k() {
    let mut squares = camera_squares();
    squares.push(SquareDetection::new(0.05, Point2::new(5.0, 5.0), "square"));
    squares.push(SquareDetection::new(0.95, Point2::new(0.0, 0.0), "clock"));

    let strict = reader(BoardOrientation::RightWhite);
    assert_eq!(
        strict.locate_squares(&squares),
        Err(BoardError::ShapeMismatch {
            expected: 64,
            got: 65
        })
    );

    let lenient = BoardReader::new(BoardReaderParams {
        squares: SquareSelectionParams {
            policy: SquareSelection::TopKByConfidence,
            ..SquareSelectionParams::default()
        },
        ..BoardReaderParams::default()
    });
    let layout = lenient.locate_squares(&squares).unwrap();
    assert!(layout.iter().all(|s| s.center != Point2::new(5.0, 5.0)));
}

#[test]
fn rejecting_collisions_surfaces_conflicts() {
    let reader = BoardReader::new(BoardReaderParams {
        collisions: CollisionPolicy::Reject,
        ..BoardReaderParams::default()
    });
    let layout = reader.locate_squares(&camera_squares()).unwrap();
    let c = layout.center("C3".parse().unwrap());
    let err = reader
        .read_board(
            &camera_squares(),
            &[
                PieceDetection::new(c, "WhiteBishop"),
                PieceDetection::new(Point2::new(c.x + 1.0, c.y), "BlackBishop"),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, BoardError::SquareConflict { .. }));
}
