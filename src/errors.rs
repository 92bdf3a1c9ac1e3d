use std::{panic, path::Path};

use color_eyre::{config::HookBuilder, eyre::Result};
use swapform::{config::get_data_dir, infra::ledger::BALANCES_FILE};

use crate::{
    logging::{LOG_FILE, log_panic},
    tui,
};

/// Text appended to every panic report: where the log is, and that the
/// ledger on disk is only written after a swap settled.
fn crash_report_section(data_dir: &Path) -> String {
    format!(
        "swapform crashed. The last handled actions are in {}.\n\
         Balances in {} only change once a swap settles, so a swap that was \
         in flight has not been applied.\n\
         Please attach the log when reporting at {}",
        data_dir.join(LOG_FILE).display(),
        data_dir.join(BALANCES_FILE).display(),
        env!("CARGO_PKG_REPOSITORY")
    )
}

/// Route panics through the log and the color-eyre report, with the terminal
/// restored first so the report is readable.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .panic_section(crash_report_section(&get_data_dir()))
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    let report = panic_hook.into_panic_hook();
    panic::set_hook(Box::new(move |info| {
        if let Err(e) = tui::restore() {
            eprintln!("Failed to restore terminal: {e}");
        }
        log_panic(info);
        report(info);
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crash_report_names_log_and_ledger() {
        let section = crash_report_section(Path::new("/tmp/swapform"));
        assert!(section.contains("swapform.log"));
        assert!(section.contains("balances.json"));
    }
}
