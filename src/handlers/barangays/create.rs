use super::*;

pub const COMMAND: &str = "barangay.create";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["name", "address"])
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, ADMIN_ONLY)?;
    let input = ctx.input::<NewBarangay>()?;
    input.validate()?;

    let barangay = input.into_record(mint_id("brgy"));

    let barangays = ctx.store().collection::<Barangay>();
    let (mut records, version) = barangays.for_update()?;
    records.insert(0, barangay.clone());
    barangays.store_if(records, version)?;

    Ok(serde_json::to_value(&barangay)?)
}
