mod common;

use common::fixtures::*;
use common::{card_center, init_logger, TestResult, Workspace};
use deckpress::pipeline::SkipReason;
use deckpress::{RunTarget, SourceSpec};

fn atlas_workspace() -> Result<Workspace, Box<dyn std::error::Error>> {
    init_logger();
    let workspace = Workspace::new()?;
    populate(&workspace)?;
    Ok(workspace)
}

#[test]
fn test_atlas_pages_are_named_by_count_and_locale() -> TestResult {
    let workspace = atlas_workspace()?;
    let mut config = small_run();
    config.atlases = vec![atlas("tickets", SourceSpec::new("tickets"))];
    let summary = workspace.run(config, RunTarget::Atlases)?;

    assert_eq!(
        workspace.list_output("atlases/nl")?,
        ["tickets-01-count-2-nl.png", "tickets-02-count-1-nl.png"]
    );
    let atlases = summary.atlases.ok_or("atlas summary missing")?;
    assert_eq!(atlases.page_count(), 2);
    assert_eq!(atlases.atlases[0].pages[1].cards, 1);
    assert!(summary.sheets.is_none());
    assert!(!workspace.output_file("print").exists());
    Ok(())
}

#[test]
fn test_cells_follow_input_order() -> TestResult {
    let workspace = atlas_workspace()?;
    let mut config = small_run();
    config.atlases = vec![atlas("tickets", SourceSpec::new("tickets"))];
    workspace.run(config, RunTarget::Atlases)?;

    let first = workspace.read_png("atlases/nl/tickets-01-count-2-nl.png")?;
    assert_eq!(first.dimensions(), (200, 100));
    assert_eq!(card_center(&first, 0, 0, CARD), RED);
    assert_eq!(card_center(&first, 100, 0, CARD), GREEN);

    // Natural order puts t-10 last; the empty cell keeps the backdrop.
    let second = workspace.read_png("atlases/nl/tickets-02-count-1-nl.png")?;
    assert_eq!(card_center(&second, 0, 0, CARD), BLUE);
    assert_eq!(card_center(&second, 100, 0, CARD), BACKDROP);
    Ok(())
}

#[test]
fn test_prefix_filters_split_faces_and_backs() -> TestResult {
    let workspace = atlas_workspace()?;
    let mut config = small_run();
    config.atlases = vec![
        atlas("milestone-faces", SourceSpec::new("milestones").with_exclude_prefix("back-")),
        atlas("milestone-backs", SourceSpec::new("milestones").with_include_prefix("back-")),
    ];
    workspace.run(config, RunTarget::Atlases)?;

    assert_eq!(
        workspace.list_output("atlases/nl")?,
        ["milestone-backs-01-count-2-nl.png", "milestone-faces-01-count-2-nl.png"]
    );
    let backs = workspace.read_png("atlases/nl/milestone-backs-01-count-2-nl.png")?;
    assert_eq!(card_center(&backs, 0, 0, CARD), CYAN);
    assert_eq!(card_center(&backs, 100, 0, CARD), MAGENTA);
    Ok(())
}

#[test]
fn test_cells_are_scaled_to_cell_size() -> TestResult {
    let workspace = atlas_workspace()?;
    let mut config = small_run();
    let mut faces = atlas("faces", SourceSpec::new("milestones").with_exclude_prefix("back-"));
    faces.card_width = 40;
    faces.card_height = 40;
    config.atlases = vec![faces];
    workspace.run(config, RunTarget::Atlases)?;

    let page = workspace.read_png("atlases/nl/faces-01-count-2-nl.png")?;
    assert_eq!(page.dimensions(), (80, 40));
    let [r, g, b, _] = card_center(&page, 40, 0, 40);
    assert!(r.abs_diff(GREEN[0]) <= 2 && g.abs_diff(GREEN[1]) <= 2 && b.abs_diff(GREEN[2]) <= 2);
    Ok(())
}

#[test]
fn test_empty_source_is_skipped() -> TestResult {
    let workspace = atlas_workspace()?;
    let mut config = small_run();
    config.atlases = vec![
        atlas("nothing", SourceSpec::new("does-not-exist")),
        atlas("tickets", SourceSpec::new("tickets")),
    ];
    let summary = workspace.run(config, RunTarget::Atlases)?;
    let atlases = summary.atlases.ok_or("atlas summary missing")?;

    assert_eq!(atlases.atlases[0].skipped, Some(SkipReason::EmptyGroup));
    assert!(atlases.atlases[0].pages.is_empty());
    assert_eq!(atlases.atlases[1].pages.len(), 2);
    Ok(())
}
