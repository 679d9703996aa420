use deckpress::types::{BackStrategy, PageSize, PixelSize};
use deckpress::{AtlasConfig, CardGroupConfig, RunConfig, SourceSpec};

pub const CARD: u32 = 100;

pub const RED: [u8; 4] = [200, 30, 30, 255];
pub const GREEN: [u8; 4] = [30, 200, 30, 255];
pub const BLUE: [u8; 4] = [30, 30, 200, 255];
pub const CYAN: [u8; 4] = [30, 200, 200, 255];
pub const MAGENTA: [u8; 4] = [200, 30, 200, 255];
pub const GRAY: [u8; 4] = [90, 90, 90, 255];
pub const YELLOW: [u8; 4] = [220, 220, 40, 255];
pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const BACKDROP: [u8; 4] = [0x11, 0x11, 0x11, 255];

/// A4 at 30 dpi: 248x351px, two columns and three rows of 100px cards.
pub fn small_run() -> RunConfig {
    RunConfig {
        page: PageSize::A4,
        dpi: 30,
        default_gap_px: 10,
        locale: "NL".to_string(),
        ..RunConfig::default()
    }
}

/// Three tickets sharing a static back, padded with an empty ticket.
pub fn tickets_group() -> CardGroupConfig {
    let mut group = CardGroupConfig::new("tickets", SourceSpec::new("tickets"), PixelSize::new(CARD, CARD));
    group.label = Some("Tickets".to_string());
    group.back_strategy = Some(BackStrategy::StaticImage { path: "misc/work-deck.png".into() });
    group.empty_card_path = Some("misc/ticket-empty.png".into());
    group
}

/// Milestones whose backs sit next to the fronts as `back-{front}`.
pub fn milestones_group() -> CardGroupConfig {
    let mut group = CardGroupConfig::new(
        "milestones",
        SourceSpec::new("milestones").with_exclude_prefix("back-"),
        PixelSize::new(CARD, CARD),
    );
    group.label = Some("Milestones".to_string());
    group.back_strategy = Some(BackStrategy::PairedPrefix { prefix: "back-".into(), dir: None });
    group
}

pub fn atlas(prefix: &str, source: SourceSpec) -> AtlasConfig {
    AtlasConfig {
        card_width: CARD,
        card_height: CARD,
        columns: 2,
        rows: 1,
        ..AtlasConfig::new(prefix, source)
    }
}

pub fn populate(workspace: &super::Workspace) -> std::io::Result<()> {
    workspace.add_card("tickets/t-1.png", CARD, RED)?;
    workspace.add_card("tickets/t-2.png", CARD, GREEN)?;
    workspace.add_card("tickets/t-10.png", CARD, BLUE)?;
    workspace.add_card("misc/work-deck.png", CARD, GRAY)?;
    workspace.add_card("misc/ticket-empty.png", CARD, YELLOW)?;
    workspace.add_card("milestones/m-1.png", CARD, RED)?;
    workspace.add_card("milestones/m-2.png", CARD, GREEN)?;
    workspace.add_card("milestones/back-m-1.png", CARD, CYAN)?;
    workspace.add_card("milestones/back-m-2.png", CARD, MAGENTA)?;
    Ok(())
}
