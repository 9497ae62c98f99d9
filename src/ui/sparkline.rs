use ratatui::style::Color;

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block glyph per sample, scaled between the window's min and max.
pub fn sparkline(samples: &[f64]) -> String {
    if samples.len() < 2 {
        return String::new();
    }
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if (max - min).abs() <= f64::EPSILON {
        1.0
    } else {
        max - min
    };
    let top = (LEVELS.len() - 1) as f64;
    samples
        .iter()
        .map(|v| {
            let idx = (((v - min) / range) * top).round() as usize;
            LEVELS[idx.min(LEVELS.len() - 1)]
        })
        .collect()
}

pub fn trend_color(trending_up: bool) -> Color {
    if trending_up {
        Color::Green
    } else {
        Color::Red
    }
}
