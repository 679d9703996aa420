//! Resolving the back face of each card and the filler card of a group.

use crate::config::CardGroupConfig;
use crate::error::PipelineError;
use crate::source::{join_path, split_path};
use deckpress_traits::ResourceProvider;
use deckpress_types::{BackStrategy, FillerCard};

/// Maps front images to back images for one group.
///
/// A static back is checked once and remembered; paired backs are checked per
/// card since each one is a different file.
pub struct BackResolver<'a> {
    provider: &'a dyn ResourceProvider,
    strategy: Option<&'a BackStrategy>,
    static_checked: bool,
}

impl<'a> BackResolver<'a> {
    pub fn new(provider: &'a dyn ResourceProvider, strategy: Option<&'a BackStrategy>) -> Self {
        Self {
            provider,
            strategy,
            static_checked: false,
        }
    }

    pub fn resolve(&mut self, front: &str) -> Result<String, PipelineError> {
        match self.strategy {
            None => Ok(front.to_string()),
            Some(BackStrategy::StaticImage { path }) => {
                if !self.static_checked {
                    if !self.provider.exists(path) {
                        return Err(PipelineError::missing(
                            path.clone(),
                            format!("Static back image not found: {}", path),
                        ));
                    }
                    self.static_checked = true;
                }
                Ok(path.clone())
            }
            Some(BackStrategy::PairedPrefix { prefix, dir }) => {
                let (front_dir, front_name) = split_path(front);
                let stem = front_name.strip_prefix(prefix.as_str()).unwrap_or(front_name);
                let back_name = format!("{}{}", prefix, stem);
                let back = join_path(dir.as_deref().unwrap_or(front_dir), &back_name);
                if !self.provider.exists(&back) {
                    return Err(PipelineError::missing(
                        back,
                        format!("Missing back image {} for {}", back_name, front_name),
                    ));
                }
                Ok(back)
            }
        }
    }
}

/// Builds the filler card of a group, if it declares one.
///
/// The filler back defaults to the group's static back, then to the filler
/// front itself.
pub fn resolve_filler(
    provider: &dyn ResourceProvider,
    group: &CardGroupConfig,
) -> Result<Option<FillerCard>, PipelineError> {
    let Some(front) = group.empty_card_path.as_deref() else {
        return Ok(None);
    };
    if !provider.exists(front) {
        return Err(PipelineError::missing(
            front,
            format!("Empty card front not found for group '{}'", group.key),
        ));
    }

    let back = match (&group.empty_card_back_path, &group.back_strategy) {
        (Some(back), _) => back.clone(),
        (None, Some(BackStrategy::StaticImage { path })) => path.clone(),
        (None, _) => front.to_string(),
    };
    if !provider.exists(&back) {
        return Err(PipelineError::missing(
            back,
            format!("Empty card back not found for group '{}'", group.key),
        ));
    }

    Ok(Some(FillerCard::new(front, back)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceSpec;
    use deckpress_traits::InMemoryResourceProvider;
    use deckpress_types::PixelSize;

    fn provider(paths: &[&str]) -> InMemoryResourceProvider {
        let provider = InMemoryResourceProvider::new();
        for path in paths {
            provider.add(*path, vec![0]).unwrap();
        }
        provider
    }

    fn group() -> CardGroupConfig {
        CardGroupConfig::new("milestones", SourceSpec::new("milestones"), PixelSize::new(490, 490))
    }

    #[test]
    fn test_no_strategy_uses_front_as_back() {
        let provider = provider(&[]);
        let mut resolver = BackResolver::new(&provider, None);
        assert_eq!(resolver.resolve("tickets/a.png").unwrap(), "tickets/a.png");
    }

    #[test]
    fn test_paired_prefix_in_front_directory() {
        let provider = provider(&["milestones/back-m1.png"]);
        let strategy = BackStrategy::PairedPrefix { prefix: "back-".into(), dir: None };
        let mut resolver = BackResolver::new(&provider, Some(&strategy));
        assert_eq!(resolver.resolve("milestones/m1.png").unwrap(), "milestones/back-m1.png");
    }

    #[test]
    fn test_paired_prefix_strips_existing_prefix() {
        let provider = provider(&["backs/back-m1.png"]);
        let strategy = BackStrategy::PairedPrefix { prefix: "back-".into(), dir: Some("backs".into()) };
        let mut resolver = BackResolver::new(&provider, Some(&strategy));
        assert_eq!(resolver.resolve("milestones/back-m1.png").unwrap(), "backs/back-m1.png");
    }

    #[test]
    fn test_missing_paired_back_names_both_files() {
        let provider = provider(&[]);
        let strategy = BackStrategy::PairedPrefix { prefix: "back-".into(), dir: None };
        let mut resolver = BackResolver::new(&provider, Some(&strategy));
        let err = resolver.resolve("milestones/m2.png").unwrap_err();
        match err {
            PipelineError::MissingAsset { path, context } => {
                assert_eq!(path, "milestones/back-m2.png");
                assert!(context.contains("back-m2.png"));
                assert!(context.contains("m2.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_static_back_is_shared() {
        let provider = provider(&["misc/role.png"]);
        let strategy = BackStrategy::StaticImage { path: "misc/role.png".into() };
        let mut resolver = BackResolver::new(&provider, Some(&strategy));
        assert_eq!(resolver.resolve("roles/a.png").unwrap(), "misc/role.png");
        assert_eq!(resolver.resolve("roles/b.png").unwrap(), "misc/role.png");
    }

    #[test]
    fn test_missing_static_back_fails() {
        let provider = provider(&[]);
        let strategy = BackStrategy::StaticImage { path: "misc/role.png".into() };
        let mut resolver = BackResolver::new(&provider, Some(&strategy));
        assert!(matches!(resolver.resolve("roles/a.png"), Err(PipelineError::MissingAsset { .. })));
    }

    #[test]
    fn test_filler_absent_without_empty_card() {
        let provider = provider(&[]);
        assert_eq!(resolve_filler(&provider, &group()).unwrap(), None);
    }

    #[test]
    fn test_filler_back_defaults() {
        let provider = provider(&["misc/empty.png", "misc/role.png"]);
        let mut group = group();
        group.empty_card_path = Some("misc/empty.png".into());
        assert_eq!(
            resolve_filler(&provider, &group).unwrap(),
            Some(FillerCard::new("misc/empty.png", "misc/empty.png"))
        );

        group.back_strategy = Some(BackStrategy::StaticImage { path: "misc/role.png".into() });
        assert_eq!(
            resolve_filler(&provider, &group).unwrap(),
            Some(FillerCard::new("misc/empty.png", "misc/role.png"))
        );
    }

    #[test]
    fn test_missing_filler_back_fails() {
        let provider = provider(&["misc/empty.png"]);
        let mut group = group();
        group.empty_card_path = Some("misc/empty.png".into());
        group.empty_card_back_path = Some("misc/empty-back.png".into());
        assert!(matches!(resolve_filler(&provider, &group), Err(PipelineError::MissingAsset { .. })));
    }
}
