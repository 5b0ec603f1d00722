use crate::collection::Screen;
use crate::commands::{CmdMessage, CmdResult, RecordDetail};
use crate::error::Result;
use crate::model::{Entity, RecordId};
use crate::pagination::Pager;
use crate::remote::Remote;

pub fn run<S: Screen, R: Remote>(remote: &mut R, pager: Pager, id: RecordId) -> Result<CmdResult> {
    let mut screen = S::with_pager(pager);
    let deleted = screen.delete(remote, id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} deleted (#{}): {}",
        <S::Record as Entity>::KIND,
        id,
        deleted.label()
    )));
    Ok(result.with_record(RecordDetail::of(&deleted)))
}
