//! Count-up animation for the numbers in the stats section.

pub const COUNT_STEPS: u32 = 50;
pub const COUNT_INTERVAL_MS: u32 = 50;

/// Leading integer of a stat label, the way `parseInt` reads it ("1500+" -> 1500).
/// Text without one counts as 0.
pub fn leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Count(i64),
    Done(i64),
}

impl Tick {
    pub fn value(self) -> i64 {
        match self {
            Tick::Count(n) | Tick::Done(n) => n,
        }
    }

    pub fn is_done(self) -> bool {
        matches!(self, Tick::Done(_))
    }
}

#[derive(Debug, Clone)]
pub struct CountUp {
    target: i64,
    current: f64,
    increment: f64,
}

impl CountUp {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            current: 0.0,
            increment: target as f64 / f64::from(COUNT_STEPS),
        }
    }

    pub fn parse(text: &str) -> Self {
        Self::new(leading_int(text))
    }

    pub fn step(&mut self) -> Tick {
        self.current += self.increment;
        if self.current >= self.target as f64 {
            Tick::Done(self.target)
        } else {
            Tick::Count(self.current.floor() as i64)
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use gloo_timers::future::TimeoutFuture;
    use log::warn;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::Element;

    use super::{CountUp, COUNT_INTERVAL_MS};
    use crate::error::SiteError;
    use crate::utils::dom;

    fn count_up(stat: Element) {
        let mut counter = CountUp::parse(&stat.text_content().unwrap_or_default());
        spawn_local(async move {
            loop {
                TimeoutFuture::new(COUNT_INTERVAL_MS).await;
                let tick = counter.step();
                stat.set_text_content(Some(&tick.value().to_string()));
                if tick.is_done() {
                    break;
                }
            }
        });
    }

    pub fn attach() -> Result<(), SiteError> {
        let Some(section) = dom::query(".stats-section")? else {
            return Ok(());
        };
        dom::observe_once(&[section], 0.5, "0px 0px -100px 0px", |_| {
            match dom::query_all(".stat-item h3") {
                Ok(stats) => stats.into_iter().for_each(count_up),
                Err(e) => warn!("Stats counter skipped: {}", e),
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::attach;
