use super::*;

pub const COMMAND: &str = "announcement.list";

pub fn guard<S>(_ctx: &Context<S>) -> bool {
    true
}

/// Lists announcements addressed to the caller. Admins see everything;
/// everyone else sees what reaches their role and barangay
/// (`x-user-barangay` session variable, when present).
pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.user_id()?;
    let announcements = ctx.store().collection::<Announcement>().records()?;

    let role = ctx.role().unwrap_or("");
    let visible: Vec<Announcement> = if role == "admin" {
        announcements
    } else {
        let barangay = ctx.session().get("x-user-barangay");
        announcements
            .into_iter()
            .filter(|a| a.audience.reaches(role, barangay))
            .collect()
    };

    Ok(json!({ "announcements": visible }))
}
