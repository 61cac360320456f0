//! Impression text generation
//!
//! Builds the short shareable sentence shown under the weather card. The output
//! locale is fixed to Japanese. Template choice goes through a
//! [`TemplateSelector`] so callers can seed or pin it.

use rand::rngs::{StdRng, ThreadRng};
use rand::{RngExt, SeedableRng};

use crate::models::CurrentConditions;

/// Appended to the feeling phrase when wind speed exceeds [`STRONG_WIND_THRESHOLD`].
pub const STRONG_WIND_CLAUSE: &str = " 風も強いので気をつけて。";

/// Strictly greater than this counts as strong wind. Same unit as the fetched data.
pub const STRONG_WIND_THRESHOLD: f64 = 10.0;

/// Number of sentence templates
pub const TEMPLATE_COUNT: usize = 3;

/// Coarse condition table for the sentence, separate from the icon table.
/// Each entry is an inclusive upper bound, checked in order after the exact-zero case.
const CONDITION_PHRASE_RULES: [(i32, &str); 5] = [
    (3, "晴れ間ものぞく空模様"),
    (48, "霧がかった天気"),
    (67, "雨"),
    (77, "雪"),
    (99, "荒れ模様"),
];

const CLEAR_PHRASE: &str = "快晴";
const FALLBACK_PHRASE: &str = "曇り";

/// Inclusive lower bounds on the rounded temperature, warmest first.
const FEELING_RULES: [(i64, &str); 5] = [
    (30, "強烈な暑さです。水分補給を忘れずに！"),
    (25, "少し暑いですが、夏らしい陽気です。"),
    (15, "過ごしやすい気温で、お出かけ日和かも。"),
    (10, "少し肌寒いですね。上着があると安心です。"),
    (0, "冷え込んでいます。暖かくして過ごしましょう。"),
];

const FREEZING_PHRASE: &str = "凍えるような寒さです…。";

/// Chooses which sentence template to use
pub trait TemplateSelector {
    /// Return an index in `0..count`. `count` is never zero.
    fn select(&mut self, count: usize) -> usize;
}

/// Uniform choice backed by a `rand` generator
#[derive(Debug)]
pub struct RandomSelector<R> {
    rng: R,
}

impl RandomSelector<ThreadRng> {
    /// Selector over the thread-local generator
    #[must_use]
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomSelector<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSelector<StdRng> {
    /// Reproducible selector for a given seed
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngExt> RandomSelector<R> {
    #[must_use]
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngExt> TemplateSelector for RandomSelector<R> {
    fn select(&mut self, count: usize) -> usize {
        self.rng.random_range(0..count)
    }
}

/// Always picks the same template, wrapped into range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSelector(pub usize);

impl TemplateSelector for FixedSelector {
    fn select(&mut self, count: usize) -> usize {
        self.0 % count
    }
}

/// Condition word used in the sentence
#[must_use]
pub fn condition_phrase(weather_code: i32) -> &'static str {
    if weather_code == 0 {
        return CLEAR_PHRASE;
    }
    CONDITION_PHRASE_RULES
        .iter()
        .find(|(upper, _)| weather_code <= *upper)
        .map_or(FALLBACK_PHRASE, |(_, phrase)| *phrase)
}

/// Temperature feeling, with the strong-wind clause appended when it applies
#[must_use]
pub fn feeling_phrase(rounded_temperature: i64, wind_speed: f64) -> String {
    let base = FEELING_RULES
        .iter()
        .find(|(lower, _)| rounded_temperature >= *lower)
        .map_or(FREEZING_PHRASE, |(_, phrase)| *phrase);

    let mut feeling = base.to_string();
    if wind_speed > STRONG_WIND_THRESHOLD {
        feeling.push_str(STRONG_WIND_CLAUSE);
    }
    feeling
}

fn render_template(index: usize, city: &str, condition: &str, temp: i64, feeling: &str) -> String {
    match index {
        0 => format!("【{city}の天気】現在は{condition}（{temp}℃）。{feeling}"),
        1 => format!("今の{city}は{temp}℃、{condition}です。{feeling}"),
        _ => format!("【現在地の天気】{city}：{condition} / {temp}℃。{feeling}"),
    }
}

/// Produces impression sentences from current conditions
#[derive(Debug)]
pub struct ImpressionGenerator<S> {
    selector: S,
}

impl<S: TemplateSelector> ImpressionGenerator<S> {
    #[must_use]
    pub fn new(selector: S) -> Self {
        Self { selector }
    }

    /// Compose one impression sentence for `city`
    pub fn generate(&mut self, city: &str, conditions: &CurrentConditions) -> String {
        generate_with(&mut self.selector, city, conditions)
    }
}

/// Compose one impression sentence, choosing the template with `selector`
pub fn generate_with<S: TemplateSelector + ?Sized>(
    selector: &mut S,
    city: &str,
    conditions: &CurrentConditions,
) -> String {
    let temp = conditions.rounded_temperature();
    let condition = condition_phrase(conditions.weather_code);
    let feeling = feeling_phrase(temp, conditions.wind_speed_ms);
    let index = selector.select(TEMPLATE_COUNT);
    render_template(index, city, condition, temp, &feeling)
}

/// Compose one impression sentence using the thread-local generator
#[must_use]
pub fn generate(city: &str, conditions: &CurrentConditions) -> String {
    generate_with(&mut RandomSelector::new(), city, conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn conditions(temperature_celsius: f64, weather_code: i32, wind_speed_ms: f64) -> CurrentConditions {
        CurrentConditions {
            temperature_celsius,
            humidity_percent: 50.0,
            wind_speed_ms,
            weather_code,
        }
    }

    #[rstest]
    #[case(0, "快晴")]
    #[case(-5, "晴れ間ものぞく空模様")]
    #[case(1, "晴れ間ものぞく空模様")]
    #[case(3, "晴れ間ものぞく空模様")]
    #[case(4, "霧がかった天気")]
    #[case(48, "霧がかった天気")]
    #[case(49, "雨")]
    #[case(50, "雨")]
    #[case(67, "雨")]
    #[case(68, "雪")]
    #[case(77, "雪")]
    #[case(78, "荒れ模様")]
    #[case(99, "荒れ模様")]
    #[case(100, "曇り")]
    fn test_condition_phrase_boundaries(#[case] code: i32, #[case] expected: &str) {
        assert_eq!(condition_phrase(code), expected);
    }

    #[test]
    fn test_phrase_table_diverges_from_icon_table() {
        use crate::classifier::{Icon, classify};

        assert_eq!(classify(4).icon, Icon::Cloud);
        assert_eq!(condition_phrase(4), "霧がかった天気");
        assert_eq!(classify(50).icon, Icon::Cloud);
        assert_eq!(condition_phrase(50), "雨");
        assert_eq!(classify(85).icon, Icon::Cloud);
        assert_eq!(condition_phrase(85), "荒れ模様");
    }

    #[rstest]
    #[case(35, "強烈な暑さです。")]
    #[case(30, "強烈な暑さです。")]
    #[case(29, "少し暑いですが")]
    #[case(25, "少し暑いですが")]
    #[case(24, "過ごしやすい気温")]
    #[case(15, "過ごしやすい気温")]
    #[case(14, "少し肌寒いですね")]
    #[case(10, "少し肌寒いですね")]
    #[case(9, "冷え込んでいます")]
    #[case(0, "冷え込んでいます")]
    #[case(-1, "凍えるような寒さです")]
    fn test_feeling_bands(#[case] temp: i64, #[case] prefix: &str) {
        let feeling = feeling_phrase(temp, 0.0);
        assert!(feeling.starts_with(prefix), "{temp}: {feeling}");
        assert!(!feeling.contains(STRONG_WIND_CLAUSE));
    }

    #[test]
    fn test_wind_clause_threshold() {
        assert!(!feeling_phrase(20, 10.0).ends_with(STRONG_WIND_CLAUSE));
        assert!(feeling_phrase(20, 10.0001).ends_with(STRONG_WIND_CLAUSE));
        assert_eq!(
            feeling_phrase(-3, 15.0),
            format!("{FREEZING_PHRASE}{STRONG_WIND_CLAUSE}")
        );
    }

    #[test]
    fn test_rounding_feeds_the_bands() {
        let mut generator = ImpressionGenerator::new(FixedSelector(1));
        let text = generator.generate("Naha", &conditions(29.5, 0, 0.0));
        assert_eq!(text, "今のNahaは30℃、快晴です。強烈な暑さです。水分補給を忘れずに！");
    }

    #[test]
    fn test_each_template_shape() {
        let current = conditions(12.3, 61, 11.0);
        let feeling = "少し肌寒いですね。上着があると安心です。 風も強いので気をつけて。";

        assert_eq!(
            generate_with(&mut FixedSelector(0), "札幌", &current),
            format!("【札幌の天気】現在は雨（12℃）。{feeling}")
        );
        assert_eq!(
            generate_with(&mut FixedSelector(1), "札幌", &current),
            format!("今の札幌は12℃、雨です。{feeling}")
        );
        assert_eq!(
            generate_with(&mut FixedSelector(2), "札幌", &current),
            format!("【現在地の天気】札幌：雨 / 12℃。{feeling}")
        );
    }

    #[test]
    fn test_random_output_is_always_a_known_template() {
        let current = conditions(-7.8, 73, 2.0);
        let expected: Vec<String> = (0..TEMPLATE_COUNT)
            .map(|i| generate_with(&mut FixedSelector(i), "Oslo", &current))
            .collect();

        let mut selector = RandomSelector::seeded(42);
        for _ in 0..50 {
            let text = generate_with(&mut selector, "Oslo", &current);
            assert!(expected.contains(&text), "unexpected impression: {text}");
            assert!(text.contains("Oslo"));
            assert!(text.contains("-8℃"));
        }

        let text = generate("Oslo", &current);
        assert!(expected.contains(&text));
    }

    #[test]
    fn test_seeded_selectors_agree() {
        let mut a = RandomSelector::seeded(7);
        let mut b = RandomSelector::seeded(7);
        let picks_a: Vec<usize> = (0..20).map(|_| a.select(TEMPLATE_COUNT)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.select(TEMPLATE_COUNT)).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|&i| i < TEMPLATE_COUNT));
    }

    #[test]
    fn test_fixed_selector_wraps() {
        assert_eq!(FixedSelector(4).select(3), 1);
    }
}
