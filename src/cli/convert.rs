use super::ui;
use crate::core::{ConversionController, UiStatus};
use anyhow::{Result, anyhow};

/// One-shot conversion. Missing currency codes keep the form defaults.
pub async fn run(
    controller: &mut ConversionController,
    amount: &str,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> Result<()> {
    controller.set_amount(amount);
    if let Some(from) = from {
        controller.set_source(from);
    }
    if let Some(to) = to {
        controller.set_target(to);
    }

    let pb = ui::new_spinner("Converting…");
    let status = controller.submit().await.clone();
    pb.finish_and_clear();

    match status {
        UiStatus::Success(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", ui::result_table(&result));
            }
            Ok(())
        }
        UiStatus::Error(message) => Err(anyhow!(message)),
        other => Err(anyhow!("Conversion did not settle: {other:?}")),
    }
}
