use super::*;

pub const COMMAND: &str = "evacuation.create";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["name", "latitude", "longitude", "capacity"])
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, ADMIN_ONLY)?;
    let input = ctx.input::<NewEvacuation>()?;
    input.validate()?;

    let center = input.into_record(mint_id("evac"));

    let centers = ctx.store().collection::<EvacuationCenter>();
    let (mut records, version) = centers.for_update()?;
    records.insert(0, center.clone());
    centers.store_if(records, version)?;

    Ok(serde_json::to_value(&center)?)
}
