use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use parfill::{
    Bitmap, Color, ColorFn, DrawJob, PngPresenter, Rect, Region, RenderSession, SessionConfig,
    WithContext, bitmap_job, scale_bitmap, solid,
};

#[derive(Parser, Debug)]
#[command(name = "parfill", version)]
struct Cli {
    /// Log scheduler and presenter activity.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through every fill mode, writing one PNG per step.
    Showcase(ShowcaseArgs),
    /// Animate a square bouncing over a gradient, writing one PNG per frame.
    Bounce(BounceArgs),
    /// Draw an image file over a gradient.
    Bitmap(BitmapArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Session config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Override buffer width.
    #[arg(long)]
    width: Option<u32>,

    /// Override buffer height.
    #[arg(long)]
    height: Option<u32>,
}

impl SessionArgs {
    fn build(&self) -> anyhow::Result<RenderSession> {
        let mut cfg = match &self.config {
            Some(path) => SessionConfig::from_path(path)?,
            None => SessionConfig::default(),
        }
        .with_env_overrides()?;
        if let Some(n) = self.threads {
            cfg.threads = Some(n);
        }
        if let Some(w) = self.width {
            cfg.width = w;
        }
        if let Some(h) = self.height {
            cfg.height = h;
        }
        Ok(RenderSession::new(cfg)?)
    }
}

#[derive(Parser, Debug)]
struct ShowcaseArgs {
    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Parser, Debug)]
struct BounceArgs {
    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames to render.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Simulation rate; each frame advances 1/fps seconds.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Parser, Debug)]
struct BitmapArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Left edge of the bitmap.
    #[arg(long, default_value_t = 0)]
    x: i32,

    /// Top edge of the bitmap.
    #[arg(long, default_value_t = 0)]
    y: i32,

    /// Nearest-neighbour scale factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    #[command(flatten)]
    session: SessionArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Showcase(args) => cmd_showcase(args),
        Command::Bounce(args) => cmd_bounce(args),
        Command::Bitmap(args) => cmd_bitmap(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn gradient(width: u32, height: u32) -> impl ColorFn {
    WithContext::new((width, height), |x: i32, y: i32, &(w, h): &(u32, u32)| {
        let fx = x as f32 / w as f32;
        let fy = y as f32 / h as f32;
        Color::rgb((fx * 255.0) as u8, (fy * 255.0) as u8, 128)
    })
}

// Layout coordinates are authored against 1000x700 and scaled to the session size.
fn layout(session: &RenderSession, x0: i32, y0: i32, x1: i32, y1: i32) -> Region {
    let cfg = session.config();
    let sx = |v: i32| (i64::from(v) * i64::from(cfg.width) / 1000) as i32;
    let sy = |v: i32| (i64::from(v) * i64::from(cfg.height) / 700) as i32;
    Region::from_coords(sx(x0), sy(y0), sx(x1), sy(y1))
}

fn cmd_showcase(args: ShowcaseArgs) -> anyhow::Result<()> {
    let mut sess = args.session.build()?;
    let mut presenter = PngPresenter::new(&args.out, "showcase");
    let (w, h) = (sess.config().width, sess.config().height);
    let (wi, hi) = (w as i32, h as i32);

    // 1: full-buffer gradient
    sess.draw(gradient(w, h));
    sess.present(&mut presenter)?;

    // 2: exclusive pixel cross, then a square written by several threads through the lock
    let (cx, cy) = (wi / 2, hi / 2);
    for d in -20..=20 {
        sess.draw_pixel(cx + d, cy, Color::WHITE);
        sess.draw_pixel(cx, cy + d, Color::WHITE);
    }
    let shared = &sess;
    std::thread::scope(|scope| {
        for band in 0..3 {
            scope.spawn(move || {
                for y in (cy - 10 + band * 7)..(cy - 10 + band * 7 + 7) {
                    for x in (cx - 10)..=(cx + 10) {
                        shared.draw_pixel_locked(x, y, Color::YELLOW);
                    }
                }
            });
        }
    });
    sess.present(&mut presenter)?;

    // 3: one bounded job
    let red_rect = DrawJob::new(layout(&sess, 50, 50, 300, 200), solid(Color::RED));
    sess.draw_bounded(&red_rect);
    sess.present(&mut presenter)?;

    // 4: disjoint jobs, filled concurrently
    let thirds = [
        DrawJob::new(layout(&sess, 0, 350, 333, 700), solid(Color::RED)),
        DrawJob::new(layout(&sess, 333, 350, 666, 700), solid(Color::GREEN)),
        DrawJob::new(layout(&sess, 666, 350, 1000, 700), solid(Color::BLUE)),
    ];
    sess.draw_multiple_bounded(&thirds);
    sess.present(&mut presenter)?;

    // 5: overlapping jobs, later wins
    let stacked = [
        DrawJob::new(layout(&sess, 100, 100, 500, 400), solid(Color::RED)),
        DrawJob::new(layout(&sess, 300, 200, 800, 500), solid(Color::GREEN)),
        DrawJob::new(layout(&sess, 400, 150, 900, 550), solid(Color::BLUE)),
    ];
    sess.draw_multiple_bounded_safe(&stacked);
    sess.present(&mut presenter)?;

    // 6: queued disjoint jobs
    sess.draw(gradient(w, h));
    for (region, color) in [
        (layout(&sess, 50, 50, 350, 300), Color::RED),
        (layout(&sess, 400, 150, 600, 400), Color::GREEN),
        (layout(&sess, 650, 100, 950, 300), Color::BLUE),
    ] {
        sess.enqueue(DrawJob::new(region, solid(color)))?;
    }
    sess.process_queue();
    sess.present(&mut presenter)?;

    // 7: queued overlapping jobs, enqueue order decides
    sess.draw(gradient(w, h));
    for (region, color) in [
        (layout(&sess, 100, 350, 600, 650), Color::RED),
        (layout(&sess, 200, 400, 700, 680), Color::GREEN),
        (layout(&sess, 300, 450, 800, 690), Color::BLUE),
    ] {
        sess.enqueue(DrawJob::new(region, solid(color)))?;
    }
    sess.process_queue_safe();
    sess.present(&mut presenter)?;

    eprintln!(
        "wrote {} frames to {}",
        presenter.frames_written(),
        args.out.display()
    );
    Ok(())
}

fn cmd_bounce(args: BounceArgs) -> anyhow::Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be finite and > 0, got {}", args.fps);
    }
    let mut sess = args.session.build()?;
    let mut presenter = PngPresenter::new(&args.out, "bounce");
    let (w, h) = (sess.config().width, sess.config().height);

    let mut square = Rect::new(10.0, 10.0, 100.0, 100.0);
    let mut velocity = (120.0_f64, 70.0_f64);
    let dt = 1.0 / args.fps;
    let square_job = DrawJob::new(Region::from_real(square), solid(Color::BLUE));

    for _ in 0..args.frames {
        square = square + kurbo::Vec2::new(velocity.0 * dt, velocity.1 * dt);
        velocity = bounce(square, velocity, f64::from(w), f64::from(h));

        sess.draw(gradient(w, h));
        sess.enqueue(square_job.with_region(Region::from_real(square)))?;
        sess.process_queue();
        sess.present(&mut presenter)?;
    }

    eprintln!(
        "wrote {} frames to {}",
        presenter.frames_written(),
        args.out.display()
    );
    Ok(())
}

fn bounce(square: Rect, (mut vx, mut vy): (f64, f64), w: f64, h: f64) -> (f64, f64) {
    if (square.x1 >= w && vx > 0.0) || (square.x0 <= 0.0 && vx < 0.0) {
        vx = -vx;
    }
    if (square.y1 >= h && vy > 0.0) || (square.y0 <= 0.0 && vy < 0.0) {
        vy = -vy;
    }
    (vx, vy)
}

fn cmd_bitmap(args: BitmapArgs) -> anyhow::Result<()> {
    let mut sess = args.session.build()?;
    let mut bmp = Bitmap::open(&args.in_path)?;
    if args.scale != 1.0 {
        bmp = scale_bitmap(&bmp, args.scale)?;
    }
    let (w, h) = (sess.config().width, sess.config().height);

    sess.draw(gradient(w, h));
    sess.enqueue(bitmap_job(&bmp, args.x, args.y))?;
    sess.process_queue_safe();

    parfill::write_png(&args.out, &sess.snapshot())
        .with_context(|| format!("write bitmap output '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
