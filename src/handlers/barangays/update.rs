use super::*;

pub const COMMAND: &str = "barangay.update";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
    #[serde(flatten)]
    pub patch: BarangayPatch,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, ADMIN_ONLY)?;
    let input = ctx.input::<Input>()?;
    input.patch.validate()?;

    let barangays = ctx.store().collection::<Barangay>();
    let (mut records, version) = barangays.for_update()?;
    let barangay = records
        .iter_mut()
        .find(|b| b.id == input.id)
        .ok_or_else(|| HandlerError::NotFound(input.id.clone()))?;
    input.patch.apply_to(barangay);
    let updated = barangay.clone();
    barangays.store_if(records, version)?;

    Ok(serde_json::to_value(&updated)?)
}
