//! Sampled sine wave

use super::{display_title, Demo, DemoOutput};

/// Samples `sin(x)` at evenly spaced points on `[start, end]`
pub struct SineWave {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for SineWave {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 10.0,
            samples: 100,
        }
    }
}

impl SineWave {
    /// `(x, sin x)` pairs, endpoints included
    pub fn points(&self) -> Vec<(f64, f64)> {
        match self.samples {
            0 => Vec::new(),
            1 => vec![(self.start, self.start.sin())],
            n => {
                let step = (self.end - self.start) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = self.start + step * i as f64;
                        (x, x.sin())
                    })
                    .collect()
            }
        }
    }
}

impl Demo for SineWave {
    fn name(&self) -> &str {
        "sine_wave"
    }

    fn run(&self) -> DemoOutput {
        let mut html = String::from("<table class=\"demo-data\"><thead><tr><th>x</th><th>y</th></tr></thead><tbody>");
        for (x, y) in self.points() {
            html.push_str(&format!("<tr><td>{:.4}</td><td>{:.4}</td></tr>", x, y));
        }
        html.push_str("</tbody></table>");

        DemoOutput {
            title: display_title(self.name()),
            html,
        }
    }
}
