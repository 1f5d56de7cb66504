//! Style-mix grid page.

mod common;

use common::{Call, ScriptedService};
use fg_core::error::GenerationError;
use fg_core::notify::Notifier;
use fg_core::request::GridForm;
use fg_core::result::StyleMixResponse;
use fg_core::seeds::SeedAllocator;
use fg_core::view::UiPhase;
use fg_core::{Applied, GridController, GridMode};

fn controller() -> GridController {
    GridController::new(GridMode::new(SeedAllocator::seeded(2024)))
}

#[tokio::test]
async fn two_by_three_scenario() {
    let service = ScriptedService::new();
    service.push_grid(Ok(StyleMixResponse { url: "/img/grid1.png".into() }));
    let mut controller = controller();
    let mut notifier = Notifier::new();

    let form = GridForm { rows: 2, cols: 3, truncation: 0.5, enhance: true };
    let applied = controller.generate(&service, &form, &mut notifier).await.unwrap();
    assert_eq!(applied, Applied::Result);

    let calls = service.calls();
    let Call::Grid(request) = &calls[0] else {
        panic!("expected a style-mix call");
    };
    assert_eq!(request.row_seeds.len(), 2);
    assert_eq!(request.col_seeds.len(), 3);
    assert!(request.row_seeds.iter().all(|s| (1..=10_000).contains(s)));
    assert!(request.col_seeds.iter().all(|s| (10_000..=20_000).contains(s)));

    let view = controller.view();
    assert_eq!(view.phase, UiPhase::Result);
    assert!(view.download_enabled);
    let details = view.details.unwrap();
    assert_eq!(details.dimensions, "2×3");
    assert_eq!(details.generated_count, "6");

    let result = controller.current_result().unwrap();
    assert_eq!(result.url, "/img/grid1.png");
    assert_eq!(&result.row_seeds, &request.row_seeds);
    assert_eq!(&result.col_seeds, &request.col_seeds);
}

#[tokio::test]
async fn error_message_is_prefixed_in_toast() {
    let service = ScriptedService::new();
    service.push_grid(Err(GenerationError::from_failure(
        500,
        "Internal Server Error",
        br#"{"detail":"Style mixing generation failed: CUDA out of memory"}"#,
        "Grid generation failed",
    )));
    let mut controller = controller();
    let mut notifier = Notifier::new();

    controller.generate(&service, &GridForm::default(), &mut notifier).await.unwrap();

    assert_eq!(
        controller.view().error,
        Some("Style mixing generation failed: CUDA out of memory")
    );
    assert_eq!(
        notifier.current().unwrap().message,
        "Failed to generate grid: Style mixing generation failed: CUDA out of memory"
    );
}

#[test]
fn empty_grid_is_rejected_before_dispatch() {
    let mut controller = controller();
    let form = GridForm { rows: 0, cols: 2, ..Default::default() };

    assert!(controller.submit(&form).is_err());
    assert_eq!(controller.view().phase, UiPhase::Empty);
}
