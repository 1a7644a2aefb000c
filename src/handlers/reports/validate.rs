use super::*;

pub const COMMAND: &str = "report.validate";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
    pub status: ReportStatus,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["id", "status"])
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, REVIEW_ROLES)?;
    let input = ctx.input::<Input>()?;
    if input.status.is_pending() {
        return Err(HandlerError::Rejected(
            "status must resolve the report".into(),
        ));
    }

    let reports = ctx.store().collection::<Report>();
    let (mut records, version) = reports.for_update()?;
    let report = records
        .iter_mut()
        .find(|r| r.id == input.id)
        .ok_or_else(|| HandlerError::NotFound(input.id.clone()))?;
    report.status = input.status;
    let updated = report.clone();
    reports.store_if(records, version)?;

    Ok(serde_json::to_value(&updated)?)
}
