mod countdown;

pub use countdown::{format_m_ss, format_mm_ss, Countdown, CountdownState, Tick};
