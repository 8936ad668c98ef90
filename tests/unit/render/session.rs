use super::*;
use crate::job::draw_job::solid;
use crate::job::region::Region;
use crate::present::surface::InMemoryPresenter;

fn session(w: u32, h: u32) -> RenderSession {
    let mut cfg = SessionConfig::with_size(w, h);
    cfg.threads = Some(2);
    cfg.clear_color = Color::rgb(9, 9, 9);
    RenderSession::new(cfg).unwrap()
}

#[test]
fn new_rejects_invalid_config() {
    assert!(RenderSession::new(SessionConfig::with_size(0, 4)).is_err());
}

#[test]
fn buffer_starts_at_clear_color() {
    let s = session(3, 3);
    assert_eq!(s.threads(), 2);
    assert!(s.snapshot().pixels.iter().all(|&c| c == Color::rgb(9, 9, 9)));
}

#[test]
fn queue_is_shared_between_producer_threads() {
    let s = session(8, 8);
    std::thread::scope(|scope| {
        for i in 0..4 {
            let s = &s;
            scope.spawn(move || {
                s.enqueue(DrawJob::new(
                    Region::from_coords(i * 2, 0, i * 2 + 2, 8),
                    solid(Color::GREEN),
                ))
                .unwrap();
            });
        }
    });
    assert_eq!(s.queue_len(), 4);
}

#[test]
fn process_queue_drains_and_fills() {
    let mut s = session(8, 1);
    s.enqueue(DrawJob::new(Region::from_coords(0, 0, 4, 1), solid(Color::RED)))
        .unwrap();
    s.enqueue(DrawJob::new(Region::from_coords(4, 0, 8, 1), solid(Color::BLUE)))
        .unwrap();
    s.process_queue();

    assert_eq!(s.queue_len(), 0);
    assert_eq!(s.buffer().get(3, 0), Some(Color::RED));
    assert_eq!(s.buffer().get(4, 0), Some(Color::BLUE));
}

#[test]
fn process_queue_safe_keeps_enqueue_order_on_overlap() {
    let mut s = session(4, 4);
    s.enqueue(DrawJob::new(Region::from_coords(0, 0, 4, 4), solid(Color::RED)))
        .unwrap();
    s.enqueue(DrawJob::new(Region::from_coords(1, 1, 3, 3), solid(Color::GREEN)))
        .unwrap();
    s.enqueue(DrawJob::new(Region::from_coords(2, 2, 4, 4), solid(Color::BLUE)))
        .unwrap();
    s.process_queue_safe();

    assert_eq!(s.queue_len(), 0);
    assert_eq!(s.buffer().get(0, 0), Some(Color::RED));
    assert_eq!(s.buffer().get(1, 1), Some(Color::GREEN));
    assert_eq!(s.buffer().get(2, 2), Some(Color::BLUE));
    assert_eq!(s.buffer().get(3, 1), Some(Color::RED));
}

#[test]
fn clear_restores_configured_color() {
    let mut s = session(2, 2);
    s.draw(solid(Color::WHITE));
    s.draw_pixel(0, 0, Color::RED);
    s.draw_pixel_locked(1, 1, Color::BLUE);
    assert_eq!(s.buffer().get(0, 0), Some(Color::RED));
    s.clear();
    assert!(s.snapshot().pixels.iter().all(|&c| c == Color::rgb(9, 9, 9)));
}

#[test]
fn present_hands_over_current_contents() {
    let mut s = session(2, 1);
    let mut presenter = InMemoryPresenter::new();
    s.present(&mut presenter).unwrap();
    s.draw_bounded(&DrawJob::new(Region::from_coords(1, 0, 2, 1), solid(Color::GREEN)));
    s.present(&mut presenter).unwrap();

    let frames = presenter.frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].get(1, 0), Some(Color::rgb(9, 9, 9)));
    assert_eq!(frames[1].get(1, 0), Some(Color::GREEN));
    assert_eq!(presenter.last().map(|f| f.width), Some(2));
}
