use super::*;

pub const COMMAND: &str = "announcement.update";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
    #[serde(flatten)]
    pub patch: AnnouncementPatch,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, ADMIN_ONLY)?;
    let input = ctx.input::<Input>()?;
    input.patch.validate()?;

    let announcements = ctx.store().collection::<Announcement>();
    let (mut records, version) = announcements.for_update()?;
    let announcement = records
        .iter_mut()
        .find(|a| a.id == input.id)
        .ok_or_else(|| HandlerError::NotFound(input.id.clone()))?;
    input.patch.apply_to(announcement);
    let updated = announcement.clone();
    announcements.store_if(records, version)?;

    Ok(serde_json::to_value(&updated)?)
}
