use super::*;

pub const COMMAND: &str = "announcement.delete";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, ADMIN_ONLY)?;
    let input = ctx.input::<Input>()?;

    let announcements = ctx.store().collection::<Announcement>();
    let (mut records, version) = announcements.for_update()?;
    let before = records.len();
    records.retain(|a| a.id != input.id);
    if records.len() == before {
        return Err(HandlerError::NotFound(input.id));
    }
    announcements.store_if(records, version)?;

    Ok(json!({ "deleted": input.id }))
}
