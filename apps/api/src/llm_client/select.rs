//! Selection among configured API keys and models.
//!
//! Injected into `LlmClient` so tests can pin the choice.

use rand::seq::IndexedRandom;

pub trait Chooser: Send + Sync {
    /// Picks one option, or `None` when there is nothing to pick from.
    fn choose<'a>(&self, options: &'a [String]) -> Option<&'a str>;
}

/// Uniformly random choice; spreads load over several keys and models.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl Chooser for RandomChooser {
    fn choose<'a>(&self, options: &'a [String]) -> Option<&'a str> {
        options.choose(&mut rand::rng()).map(String::as_str)
    }
}

/// Always the first option.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn choose<'a>(&self, options: &'a [String]) -> Option<&'a str> {
        options.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_empty_options_yield_none() {
        assert_eq!(RandomChooser.choose(&[]), None);
        assert_eq!(FirstChooser.choose(&[]), None);
    }

    #[test]
    fn test_first_chooser_is_deterministic() {
        let opts = options();
        assert_eq!(FirstChooser.choose(&opts), Some("a"));
        assert_eq!(FirstChooser.choose(&opts), Some("a"));
    }

    #[test]
    fn test_random_chooser_picks_a_member() {
        let opts = options();
        for _ in 0..50 {
            let picked = RandomChooser.choose(&opts).expect("non-empty");
            assert!(opts.iter().any(|o| o == picked));
        }
    }
}
