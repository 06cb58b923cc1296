#[derive(Clone, Debug)]
pub struct TickConfig {
    /// Number of intervals; `intervals + 1` ticks are produced.
    pub intervals: usize,
    /// Length of the tick mark in pixels.
    pub mark_length: f32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            intervals: 5,
            mark_length: 5.0,
        }
    }
}

/// A tick at `ratio` of the way along an axis, labelled with `value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub ratio: f32,
    pub value: f32,
}

impl Tick {
    /// Label text with one decimal place.
    pub fn label(&self) -> String {
        format!("{:.1}", self.value)
    }
}

/// Evenly spaced ticks over the unpadded data range `[min, max]`.
///
/// Tick values ignore the padding applied to the screen mapping, so the last
/// label names `max` even though it sits before the padded end of the axis.
pub fn compute_ticks(range_min: f32, range_max: f32, config: &TickConfig) -> Vec<Tick> {
    let intervals = config.intervals.max(1);
    let span = range_max - range_min;

    (0..=intervals)
        .map(|i| {
            let ratio = i as f32 / intervals as f32;
            Tick {
                ratio,
                value: range_min + ratio * span,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_intervals_give_six_ticks() {
        let ticks = compute_ticks(0.0, 10.0, &TickConfig::default());
        let ratios: Vec<f32> = ticks.iter().map(|t| t.ratio).collect();
        assert_eq!(ratios, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks[0].value, 0.0);
        assert_eq!(ticks[5].value, 10.0);
    }

    #[test]
    fn labels_have_one_decimal() {
        let ticks = compute_ticks(1.0, 4.0, &TickConfig::default());
        let labels: Vec<String> = ticks.iter().map(Tick::label).collect();
        assert_eq!(labels, vec!["1.0", "1.6", "2.2", "2.8", "3.4", "4.0"]);
    }

    #[test]
    fn constant_range_repeats_value() {
        let ticks = compute_ticks(3.0, 3.0, &TickConfig::default());
        assert!(ticks.iter().all(|t| t.value == 3.0));
    }
}
