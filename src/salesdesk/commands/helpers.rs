use crate::commands::FieldAssignment;
use crate::draft::DraftSession;
use crate::error::Result;
use crate::model::Entity;

/// Types each `field=value` into the draft, in order.
pub fn apply_assignments<E: Entity>(
    draft: &mut DraftSession<E>,
    assignments: &[FieldAssignment],
) -> Result<()> {
    for assignment in assignments {
        draft.set(&assignment.field, assignment.value.as_str())?;
    }
    Ok(())
}
