#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WpmSample {
    pub t: f64,
    pub wpm: f64,
}

impl WpmSample {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<(f64, f64)> for WpmSample {
    fn from(v: (f64, f64)) -> Self {
        WpmSample { t: v.0, wpm: v.1 }
    }
}

impl From<WpmSample> for (f64, f64) {
    fn from(p: WpmSample) -> Self {
        (p.t, p.wpm)
    }
}
