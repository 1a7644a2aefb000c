use super::*;

pub const COMMAND: &str = "report.submit";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["description", "latitude", "longitude"])
}

/// Any authenticated user may report a hazard they see.
pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let submitter = ctx.user_id()?.to_string();
    let input = ctx.input::<NewReport>()?;
    input.validate()?;

    let report = input.into_record(mint_id("rpt"), submitter);

    let reports = ctx.store().collection::<Report>();
    let (mut records, version) = reports.for_update()?;
    records.insert(0, report.clone());
    reports.store_if(records, version)?;

    Ok(serde_json::to_value(&report)?)
}
