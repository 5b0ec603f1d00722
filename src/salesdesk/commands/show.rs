use crate::commands::{CmdResult, RecordDetail};
use crate::error::Result;
use crate::model::{Entity, RecordId};
use crate::remote::Remote;

pub fn run<E: Entity, R: Remote>(remote: &R, id: RecordId) -> Result<CmdResult> {
    let record = remote.get::<E>(id)?;
    Ok(CmdResult::default().with_record(RecordDetail::of(&record)))
}
