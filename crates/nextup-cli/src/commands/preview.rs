use anyhow::Result;
use nextup_core::error::CoreError;
use nextup_core::models::format_date;
use nextup_core::recurrence::next_date;
use nextup_core::rule::parse;

use crate::cli::PreviewCommand;
use crate::util::date_or_today;

/// Prints the next `count` dates of a rule, each one computed from the
/// previous result.
pub fn preview(command: PreviewCommand) -> Result<()> {
    let rule = parse(&command.repeat).map_err(CoreError::from)?;
    let mut current = date_or_today(command.from.as_deref())?;

    println!("Next {} dates for '{}' ({}):", command.count, rule, rule.kind());
    for _ in 0..command.count {
        current = next_date(current, current, &rule).map_err(CoreError::from)?;
        println!("  {}  {}", format_date(current), current.format("%a %d %b %Y"));
    }

    Ok(())
}
