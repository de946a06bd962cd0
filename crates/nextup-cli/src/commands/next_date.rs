use anyhow::Result;
use nextup_core::error::CoreError;
use nextup_core::models::{format_date, parse_date};
use nextup_core::recurrence::next_date_from_str;

use crate::cli::NextDateCommand;

pub fn next_date(command: NextDateCommand) -> Result<()> {
    let anchor = parse_date(&command.date)?;
    let reference = parse_date(&command.now)?;

    let next = next_date_from_str(anchor, reference, &command.repeat).map_err(CoreError::from)?;
    println!("{}", format_date(next));

    Ok(())
}
