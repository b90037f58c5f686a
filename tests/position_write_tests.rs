//! Position write path against a file-backed SQLite database.

mod harness;
mod support;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use diesel::prelude::*;
use harness::temp_db::TempDb;
use support::fixtures::add_device;
use trackwell::adapter::outbound::sqlite::database::model::{DeviceRow, PositionRow};
use trackwell::adapter::outbound::sqlite::database::schema::{devices, positions};
use trackwell::adapter::outbound::sqlite::WriteStatements;
use trackwell::application::position::PositionWriter;
use trackwell::domain::PositionId;
use trackwell::testkit::domain::{position_for, tagged_position};

fn load_positions(db: &TempDb) -> Vec<PositionRow> {
    let mut conn = db.pool().get().unwrap();
    positions::table
        .select(PositionRow::as_select())
        .order(positions::id.asc())
        .load(&mut conn)
        .unwrap()
}

fn load_device(db: &TempDb, id: i64) -> DeviceRow {
    let mut conn = db.pool().get().unwrap();
    devices::table
        .find(id)
        .select(DeviceRow::as_select())
        .first(&mut conn)
        .unwrap()
}

#[test]
fn concurrent_inserts_pair_ids_with_their_rows() {
    const WRITERS: u32 = 24;

    let db = TempDb::with_pool_size("concurrent-writes", 8);
    let store = Arc::new(db.store());
    let device = add_device(store.as_ref(), "IMEI-A");
    let writer = Arc::new(PositionWriter::new(store));

    let handles: Vec<_> = (0..WRITERS)
        .map(|tag| {
            let writer = Arc::clone(&writer);
            let device_id = device.id.value();
            thread::spawn(move || {
                let id = writer
                    .add_position(&tagged_position(device_id, tag))
                    .unwrap()
                    .unwrap();
                (tag, id)
            })
        })
        .collect();
    let returned: Vec<(u32, PositionId)> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    let distinct: HashSet<PositionId> = returned.iter().map(|(_, id)| *id).collect();
    assert_eq!(distinct.len(), WRITERS as usize);

    let rows = load_positions(&db);
    assert_eq!(rows.len(), WRITERS as usize);
    for (tag, id) in returned {
        let row = rows.iter().find(|r| r.id == id.value()).unwrap();
        assert_eq!(row.other.as_deref(), Some(format!("tag-{tag}").as_str()));
        assert_eq!(row.speed, f64::from(tag));
    }
}

#[test]
fn update_latest_position_repoints_without_inserting() {
    let db = TempDb::create("latest-pointer");
    let store = Arc::new(db.store());
    let device = add_device(store.as_ref(), "IMEI-A");
    let writer = PositionWriter::new(store);

    let position = position_for(device.id.value());
    let first = writer.add_position(&position).unwrap().unwrap();
    writer.update_latest_position(&position, first).unwrap();
    assert_eq!(load_device(&db, device.id.value()).position_id, Some(first.value()));

    let second = writer.add_position(&position).unwrap().unwrap();
    writer.update_latest_position(&position, second).unwrap();
    writer.update_latest_position(&position, second).unwrap();

    assert_eq!(load_device(&db, device.id.value()).position_id, Some(second.value()));
    assert_eq!(load_positions(&db).len(), 2);
}

#[test]
fn disabled_insert_statement_produces_no_id() {
    let db = TempDb::create("no-insert");
    let store = Arc::new(db.store_with(WriteStatements {
        insert_position: false,
        update_latest_position: true,
    }));
    let device = add_device(store.as_ref(), "IMEI-A");
    let writer = PositionWriter::new(store);

    let id = writer.add_position(&position_for(device.id.value())).unwrap();

    assert!(id.is_none());
    assert!(load_positions(&db).is_empty());
}

#[test]
fn disabled_update_statement_leaves_pointer_unset() {
    let db = TempDb::create("no-update");
    let store = Arc::new(db.store_with(WriteStatements {
        insert_position: true,
        update_latest_position: false,
    }));
    let device = add_device(store.as_ref(), "IMEI-A");
    let writer = PositionWriter::new(store);

    let position = position_for(device.id.value());
    let id = writer.add_position(&position).unwrap().unwrap();
    writer.update_latest_position(&position, id).unwrap();

    assert_eq!(load_device(&db, device.id.value()).position_id, None);
}
