//! Health score ring: a text gauge that fills from 0 to the score.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

const START_DELAY: Duration = Duration::from_millis(100);
const FILL_DURATION: Duration = Duration::from_millis(1000);
const FRAME: Duration = Duration::from_millis(40);
pub const GAUGE_WIDTH: usize = 30;

/// Fill level `elapsed` after first display. Holds 0 for a short delay,
/// then eases out towards `target`.
pub fn value_at(target: f64, elapsed: Duration) -> f64 {
    let Some(t) = elapsed.checked_sub(START_DELAY) else {
        return 0.0;
    };
    let progress = (t.as_secs_f64() / FILL_DURATION.as_secs_f64()).min(1.0);
    let eased = 1.0 - (1.0 - progress).powi(3);
    target * eased
}

/// `[#########.....]  73` style gauge for a 0–100 value.
pub fn gauge(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3}",
        "#".repeat(filled),
        ".".repeat(width - filled),
        value.round() as i64
    )
}

/// Redraw the gauge in place until it reaches `target`. `paint` colors each frame.
pub async fn animate<W, F>(out: &mut W, target: f64, paint: F) -> Result<()>
where
    W: Write,
    F: Fn(String) -> String,
{
    let total = START_DELAY + FILL_DURATION;
    let start = tokio::time::Instant::now();
    loop {
        let elapsed = start.elapsed().min(total);
        write!(out, "\r {}", paint(gauge(value_at(target, elapsed), GAUGE_WIDTH)))?;
        out.flush()?;
        if elapsed >= total {
            break;
        }
        tokio::time::sleep(FRAME).await;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_holds_zero_during_delay() {
        assert_eq!(value_at(82.0, Duration::ZERO), 0.0);
        assert_eq!(value_at(82.0, Duration::from_millis(99)), 0.0);
    }

    #[test]
    fn test_value_reaches_target() {
        assert_eq!(value_at(82.0, Duration::from_millis(1100)), 82.0);
        assert_eq!(value_at(82.0, Duration::from_secs(10)), 82.0);
    }

    #[test]
    fn test_value_is_monotonic() {
        let mut last = 0.0;
        for ms in (0..=1200).step_by(25) {
            let v = value_at(64.0, Duration::from_millis(ms));
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_gauge() {
        assert_eq!(gauge(0.0, 4), "[....]   0");
        assert_eq!(gauge(50.0, 4), "[##..]  50");
        assert_eq!(gauge(100.0, 4), "[####] 100");
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_ends_on_target() {
        let mut out = Vec::new();
        animate(&mut out, 82.0, |s| s).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        let last_frame = text.trim_end().rsplit('\r').next().unwrap();
        assert!(last_frame.ends_with(" 82"), "{last_frame:?}");
    }
}
