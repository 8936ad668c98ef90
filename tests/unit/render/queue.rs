use super::*;
use crate::foundation::core::Color;
use crate::job::draw_job::solid;
use crate::job::region::Region;

fn job(x0: i32, x1: i32, c: Color) -> DrawJob {
    DrawJob::new(Region::from_coords(x0, 0, x1, 2), solid(c))
}

#[test]
fn capacity_doubles_from_initial_size() {
    let mut q = DrawQueue::new(4);
    assert_eq!(q.capacity(), 0);

    let mut seen = Vec::new();
    for i in 0..17 {
        q.enqueue(job(i, i + 1, Color::RED)).unwrap();
        if seen.last() != Some(&q.capacity()) {
            seen.push(q.capacity());
        }
    }
    assert_eq!(seen, vec![4, 8, 16, 32]);
    assert_eq!(q.len(), 17);
}

#[test]
fn failed_growth_is_reported_and_leaves_queue_untouched() {
    let mut q = DrawQueue::new(usize::MAX / 2);
    let err = q.enqueue(job(0, 1, Color::RED)).unwrap_err();
    assert!(matches!(err, ParfillError::Allocation(_)));
    assert!(err.to_string().starts_with("allocation error:"));
    assert!(q.is_empty());
    assert_eq!(q.capacity(), 0);
}

#[test]
fn jobs_keep_enqueue_order() {
    let mut q = DrawQueue::default();
    for i in 0..5 {
        q.enqueue(job(i, i + 1, Color(i as u32))).unwrap();
    }
    let order: Vec<i32> = q.jobs().iter().map(|j| j.region.top_left.x).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
}

#[test]
fn drain_safe_matches_direct_safe_fill_and_empties_queue() {
    let sched = Scheduler::new(Some(2)).unwrap();
    let jobs = [
        job(0, 3, Color::RED),
        job(2, 5, Color::GREEN),
        job(4, 6, Color::BLUE),
    ];

    let mut direct = PixelBuffer::new(6, 2, Color::BLACK).unwrap();
    sched.draw_multiple_bounded_safe(&mut direct, &jobs);

    let mut q = DrawQueue::new(2);
    for j in &jobs {
        q.enqueue(j.clone()).unwrap();
    }
    let cap = q.capacity();
    let mut queued = PixelBuffer::new(6, 2, Color::BLACK).unwrap();
    q.drain_safe(&sched, &mut queued);

    assert_eq!(queued.snapshot(), direct.snapshot());
    assert_eq!(
        queued.snapshot().pixels[..6],
        [
            Color::RED,
            Color::RED,
            Color::GREEN,
            Color::GREEN,
            Color::BLUE,
            Color::BLUE
        ]
    );
    assert!(q.is_empty());
    assert_eq!(q.capacity(), cap);
}

#[test]
fn drain_unsafe_matches_direct_fill_for_disjoint_jobs() {
    let sched = Scheduler::new(Some(3)).unwrap();
    let jobs = [
        job(0, 2, Color::RED),
        job(2, 4, Color::GREEN),
        job(4, 6, Color::BLUE),
    ];

    let mut direct = PixelBuffer::new(6, 2, Color::BLACK).unwrap();
    sched.draw_multiple_bounded(&mut direct, &jobs);

    let mut q = DrawQueue::default();
    for j in &jobs {
        q.enqueue(j.clone()).unwrap();
    }
    let mut queued = PixelBuffer::new(6, 2, Color::BLACK).unwrap();
    q.drain_unsafe(&sched, &mut queued);

    assert_eq!(queued.snapshot(), direct.snapshot());
    assert_eq!(q.len(), 0);
}

#[test]
fn draining_an_empty_queue_is_a_no_op() {
    let sched = Scheduler::new(Some(1)).unwrap();
    let mut buf = PixelBuffer::new(2, 2, Color::WHITE).unwrap();
    let mut q = DrawQueue::default();
    q.drain_safe(&sched, &mut buf);
    q.drain_unsafe(&sched, &mut buf);
    assert_eq!(buf.snapshot().pixels, vec![Color::WHITE; 4]);
}

#[test]
fn clear_discards_without_drawing() {
    let mut q = DrawQueue::default();
    q.enqueue(job(0, 1, Color::RED)).unwrap();
    q.clear();
    assert!(q.is_empty());
}
