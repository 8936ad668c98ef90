use super::*;

#[test]
fn new_fills_and_reports_dimensions() {
    let buf = PixelBuffer::new(4, 3, Color::GREEN).unwrap();
    assert_eq!((buf.width(), buf.height(), buf.len()), (4, 3, 12));
    assert!(!buf.is_empty());
    assert!(buf.snapshot().pixels.iter().all(|&c| c == Color::GREEN));
}

#[test]
fn new_rejects_zero_dimensions() {
    assert!(PixelBuffer::new(0, 3, Color::BLACK).is_err());
    assert!(PixelBuffer::new(3, 0, Color::BLACK).is_err());
}

#[test]
fn draw_pixel_is_row_major_and_bounds_checked() {
    let mut buf = PixelBuffer::new(4, 3, Color::BLACK).unwrap();
    buf.draw_pixel(3, 2, Color::RED);
    buf.draw_pixel(-1, 0, Color::RED);
    buf.draw_pixel(4, 0, Color::RED);
    buf.draw_pixel(0, 3, Color::RED);

    let frame = buf.snapshot();
    assert_eq!(frame.pixels[2 * 4 + 3], Color::RED);
    assert_eq!(frame.pixels.iter().filter(|&&c| c == Color::RED).count(), 1);
    assert_eq!(buf.get(3, 2), Some(Color::RED));
    assert_eq!(buf.get(4, 2), None);
    assert_eq!(buf.get(0, -1), None);
}

#[test]
fn locked_writes_from_many_threads_land() {
    let buf = PixelBuffer::new(16, 16, Color::BLACK).unwrap();
    std::thread::scope(|s| {
        for t in 0..4 {
            let buf = &buf;
            s.spawn(move || {
                for y in (t * 4)..(t * 4 + 4) {
                    for x in 0..16 {
                        buf.draw_pixel_locked(x, y, Color::YELLOW);
                    }
                }
                buf.draw_pixel_locked(-5, 99, Color::RED);
            });
        }
    });
    assert!(buf.snapshot().pixels.iter().all(|&c| c == Color::YELLOW));
}

#[test]
fn fill_overwrites_everything() {
    let mut buf = PixelBuffer::new(2, 2, Color::BLACK).unwrap();
    buf.draw_pixel(1, 1, Color::RED);
    buf.fill(Color::WHITE);
    assert_eq!(buf.snapshot().pixels, vec![Color::WHITE; 4]);
}

#[test]
fn snapshot_into_reuses_frame() {
    let mut buf = PixelBuffer::new(3, 1, Color::BLUE).unwrap();
    let mut frame = Frame {
        width: 9,
        height: 9,
        pixels: vec![Color::RED; 81],
    };
    buf.snapshot_into(&mut frame);
    assert_eq!((frame.width, frame.height), (3, 1));
    assert_eq!(frame.pixels, vec![Color::BLUE; 3]);

    buf.draw_pixel(0, 0, Color::GREEN);
    buf.snapshot_into(&mut frame);
    assert_eq!(frame.get(0, 0), Some(Color::GREEN));
    assert_eq!(frame.get(3, 0), None);
}

#[test]
fn frame_rgb8_drops_alpha_byte() {
    let frame = Frame {
        width: 2,
        height: 1,
        pixels: vec![Color::argb(0xFF, 1, 2, 3), Color::rgb(4, 5, 6)],
    };
    assert_eq!(frame.to_rgb8(), vec![1, 2, 3, 4, 5, 6]);
}
