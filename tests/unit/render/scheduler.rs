use super::*;
use crate::foundation::core::Color;
use crate::job::draw_job::solid;

const BG: Color = Color::rgb(1, 2, 3);

fn buffer(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::new(w, h, BG).unwrap()
}

fn coord_color(x: i32, y: i32) -> Color {
    Color(((x as u32) << 16) | y as u32)
}

#[test]
fn zero_threads_is_rejected() {
    assert!(Scheduler::new(Some(0)).is_err());
    assert_eq!(Scheduler::new(Some(2)).unwrap().threads(), 2);
}

#[test]
fn draw_fills_every_pixel_with_function_value() {
    let sched = Scheduler::new(Some(3)).unwrap();
    let mut buf = buffer(17, 9);
    sched.draw(&mut buf, &coord_color);
    let frame = buf.snapshot();
    for y in 0..9 {
        for x in 0..17 {
            assert_eq!(frame.get(x, y), Some(coord_color(x as i32, y as i32)));
        }
    }
}

#[test]
fn bounded_fill_touches_only_clamped_range() {
    let sched = Scheduler::new(Some(4)).unwrap();
    let mut buf = buffer(10, 8);
    let job = DrawJob::new(Region::from_coords(-3, 2, 6, 20), coord_color);
    sched.draw_bounded(&mut buf, &job);

    let frame = buf.snapshot();
    for y in 0..8u32 {
        for x in 0..10u32 {
            let inside = x < 6 && y >= 2;
            let expected = if inside {
                coord_color(x as i32, y as i32)
            } else {
                BG
            };
            assert_eq!(frame.get(x, y), Some(expected), "({x},{y})");
        }
    }
}

#[test]
fn empty_and_inverted_regions_write_nothing() {
    let sched = Scheduler::new(Some(2)).unwrap();
    let mut buf = buffer(6, 6);
    sched.draw_bounded(
        &mut buf,
        &DrawJob::new(Region::from_coords(4, 4, 1, 1), solid(Color::RED)),
    );
    sched.draw_bounded(
        &mut buf,
        &DrawJob::new(Region::from_coords(50, 50, 60, 60), solid(Color::RED)),
    );
    sched.draw_multiple_bounded(&mut buf, &[]);
    sched.draw_multiple_bounded_safe(&mut buf, &[]);
    assert!(buf.snapshot().pixels.iter().all(|&c| c == BG));
}

#[test]
fn disjoint_jobs_match_regardless_of_mode_or_threads() {
    let jobs: Vec<DrawJob> = (0..8)
        .map(|i| {
            DrawJob::new(
                Region::from_coords(i * 4, 0, i * 4 + 4, 16),
                move |x: i32, y: i32| Color((i as u32) << 24 | coord_color(x, y).0),
            )
        })
        .collect();

    let mut reference = buffer(32, 16);
    Scheduler::new(Some(1))
        .unwrap()
        .draw_multiple_bounded_safe(&mut reference, &jobs);
    let reference = reference.snapshot();

    for threads in [1, 2, 8] {
        let sched = Scheduler::new(Some(threads)).unwrap();
        let mut buf = buffer(32, 16);
        sched.draw_multiple_bounded(&mut buf, &jobs);
        assert_eq!(buf.snapshot(), reference, "threads={threads}");

        let mut reversed: Vec<DrawJob> = jobs.clone();
        reversed.reverse();
        let mut buf = buffer(32, 16);
        sched.draw_multiple_bounded(&mut buf, &reversed);
        assert_eq!(buf.snapshot(), reference, "reversed threads={threads}");
    }
}

#[test]
fn overlapping_jobs_last_wins_in_safe_mode() {
    let sched = Scheduler::new(Some(4)).unwrap();
    let mut buf = buffer(4, 4);
    let jobs = [
        DrawJob::new(Region::from_coords(0, 0, 2, 2), solid(Color::RED)),
        DrawJob::new(Region::from_coords(1, 1, 3, 3), solid(Color::BLUE)),
    ];
    sched.draw_multiple_bounded_safe(&mut buf, &jobs);

    assert_eq!(buf.get(1, 1), Some(Color::BLUE));
    assert_eq!(buf.get(0, 0), Some(Color::RED));
    assert_eq!(buf.get(2, 2), Some(Color::BLUE));
    assert_eq!(buf.get(3, 3), Some(BG));
}

#[test]
fn overlap_order_holds_for_many_stacked_jobs() {
    let sched = Scheduler::new(Some(8)).unwrap();
    let mut buf = buffer(40, 40);
    let jobs: Vec<DrawJob> = (0..20)
        .map(|i| {
            DrawJob::new(
                Region::from_coords(i, i, 40 - i, 40 - i),
                solid(Color(i as u32 + 1)),
            )
        })
        .collect();
    sched.draw_multiple_bounded_safe(&mut buf, &jobs);

    let clamped: Vec<_> = jobs.iter().map(|j| j.region.clamp(40, 40)).collect();
    for y in 0..40usize {
        for x in 0..40usize {
            let top = clamped.iter().rposition(|c| c.contains(x, y));
            let expected = top.map_or(BG, |i| Color(i as u32 + 1));
            assert_eq!(buf.get(x as i32, y as i32), Some(expected));
        }
    }
}

#[test]
fn overlapping_jobs_in_unsafe_mode_write_one_of_the_candidates() {
    let sched = Scheduler::new(Some(4)).unwrap();
    let mut buf = buffer(8, 8);
    let jobs = [
        DrawJob::new(Region::from_coords(0, 0, 6, 6), solid(Color::RED)),
        DrawJob::new(Region::from_coords(2, 2, 8, 8), solid(Color::GREEN)),
    ];
    sched.draw_multiple_bounded(&mut buf, &jobs);

    assert_eq!(buf.get(0, 0), Some(Color::RED));
    assert_eq!(buf.get(7, 7), Some(Color::GREEN));
    let shared = buf.get(3, 3).unwrap();
    assert!(shared == Color::RED || shared == Color::GREEN);
    assert_eq!(buf.get(7, 0), Some(BG));
}
