use super::*;

pub const COMMAND: &str = "evacuation.link_barangay";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["id", "barangay_id"])
}

/// Assigns a barangay to an evacuation center. Linking an already
/// assigned barangay is a no-op.
pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, ADMIN_ONLY)?;
    let input = ctx.input::<LinkInput>()?;

    let centers = ctx.store().collection::<EvacuationCenter>();
    let (mut records, version) = centers.for_update()?;
    let center = records
        .iter_mut()
        .find(|c| c.id == input.id)
        .ok_or_else(|| HandlerError::NotFound(input.id.clone()))?;
    if !center.barangay_ids.contains(&input.barangay_id) {
        center.barangay_ids.push(input.barangay_id);
    }
    let updated = center.clone();
    centers.store_if(records, version)?;

    Ok(serde_json::to_value(&updated)?)
}
