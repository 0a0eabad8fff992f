//! Inventory store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist places and items keyed by stable UUIDs.
//! - Answer query-by-parent for a place's items in a stable order.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - An item moved to another place is appended after that place's items.
//! - Deleting a place deletes its items in the same transaction.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::item::{Item, ItemId};
use crate::model::place::{Place, PlaceId};
use crate::model::position::Position;
use crate::model::validation::ValidationError;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PLACE_SELECT_SQL: &str = "SELECT place_uuid, name, image FROM places";

const ITEM_SELECT_SQL: &str = "SELECT
    item_uuid,
    place_uuid,
    name,
    description,
    pos_x,
    pos_y
FROM items";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer failure.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Record failed validation before it reached SQL.
    Validation(ValidationError),
    PlaceNotFound(PlaceId),
    ItemNotFound(ItemId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted row cannot be converted into a valid record.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::PlaceNotFound(id) => write!(f, "place not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "inventory store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "inventory store requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid inventory data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Filter for item listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Restrict to one owning place; `None` lists every item.
    pub place_id: Option<PlaceId>,
}

impl ItemFilter {
    pub fn in_place(place_id: PlaceId) -> Self {
        Self {
            place_id: Some(place_id),
        }
    }
}

/// Durable keyed record store for places and items.
pub trait InventoryStore {
    fn insert_place(&self, place: &Place) -> StoreResult<PlaceId>;
    fn update_place(&self, place: &Place) -> StoreResult<()>;
    /// Deletes one place and every item it owns. Returns removed item count.
    fn delete_place(&self, id: PlaceId) -> StoreResult<usize>;
    /// Lists places in creation order.
    fn list_places(&self) -> StoreResult<Vec<Place>>;
    fn insert_item(&self, item: &Item) -> StoreResult<ItemId>;
    /// Writes name, description, owning place and position in one statement
    /// group. A place change appends the item to the new place's order.
    fn update_item(&self, item: &Item) -> StoreResult<()>;
    fn delete_item(&self, id: ItemId) -> StoreResult<()>;
    fn list_items(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>>;
}

/// SQLite-backed inventory store.
pub struct SqliteInventoryStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInventoryStore<'conn> {
    /// Creates a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl InventoryStore for SqliteInventoryStore<'_> {
    fn insert_place(&self, place: &Place) -> StoreResult<PlaceId> {
        place.validate()?;
        self.conn.execute(
            "INSERT INTO places (place_uuid, name, image) VALUES (?1, ?2, ?3);",
            params![place.id.to_string(), place.name, place.image],
        )?;
        Ok(place.id)
    }

    fn update_place(&self, place: &Place) -> StoreResult<()> {
        place.validate()?;
        let changed = self.conn.execute(
            "UPDATE places
             SET name = ?2,
                 image = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE place_uuid = ?1;",
            params![place.id.to_string(), place.name, place.image],
        )?;
        if changed == 0 {
            return Err(StoreError::PlaceNotFound(place.id));
        }
        Ok(())
    }

    fn delete_place(&self, id: PlaceId) -> StoreResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_place_exists(&tx, id)?;
        let removed_items = tx.execute(
            "DELETE FROM items WHERE place_uuid = ?1;",
            [id.to_string()],
        )?;
        tx.execute("DELETE FROM places WHERE place_uuid = ?1;", [id.to_string()])?;
        tx.commit()?;
        Ok(removed_items)
    }

    fn list_places(&self) -> StoreResult<Vec<Place>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLACE_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut places = Vec::new();
        while let Some(row) = rows.next()? {
            places.push(parse_place_row(row)?);
        }
        Ok(places)
    }

    fn insert_item(&self, item: &Item) -> StoreResult<ItemId> {
        item.validate()?;
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_place_exists(&tx, item.place_id)?;
        let sort_order = next_sort_order(&tx, item.place_id)?;
        tx.execute(
            "INSERT INTO items (
                item_uuid,
                place_uuid,
                name,
                description,
                pos_x,
                pos_y,
                sort_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                item.id.to_string(),
                item.place_id.to_string(),
                item.name,
                item.description,
                item.position.x(),
                item.position.y(),
                sort_order,
            ],
        )?;
        tx.commit()?;
        Ok(item.id)
    }

    fn update_item(&self, item: &Item) -> StoreResult<()> {
        item.validate()?;
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let current_place: Option<String> = tx
            .query_row(
                "SELECT place_uuid FROM items WHERE item_uuid = ?1;",
                [item.id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(current_place) = current_place else {
            return Err(StoreError::ItemNotFound(item.id));
        };

        if current_place == item.place_id.to_string() {
            tx.execute(
                "UPDATE items
                 SET name = ?2,
                     description = ?3,
                     pos_x = ?4,
                     pos_y = ?5,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE item_uuid = ?1;",
                params![
                    item.id.to_string(),
                    item.name,
                    item.description,
                    item.position.x(),
                    item.position.y(),
                ],
            )?;
        } else {
            ensure_place_exists(&tx, item.place_id)?;
            let sort_order = next_sort_order(&tx, item.place_id)?;
            tx.execute(
                "UPDATE items
                 SET place_uuid = ?2,
                     name = ?3,
                     description = ?4,
                     pos_x = ?5,
                     pos_y = ?6,
                     sort_order = ?7,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE item_uuid = ?1;",
                params![
                    item.id.to_string(),
                    item.place_id.to_string(),
                    item.name,
                    item.description,
                    item.position.x(),
                    item.position.y(),
                    sort_order,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE item_uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::ItemNotFound(id));
        }
        Ok(())
    }

    fn list_items(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>> {
        let mut items = Vec::new();
        match filter.place_id {
            Some(place_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{ITEM_SELECT_SQL}
                     WHERE place_uuid = ?1
                     ORDER BY sort_order ASC, rowid ASC;"
                ))?;
                let mut rows = stmt.query([place_id.to_string()])?;
                while let Some(row) = rows.next()? {
                    items.push(parse_item_row(row)?);
                }
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{ITEM_SELECT_SQL} ORDER BY rowid ASC;"))?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    items.push(parse_item_row(row)?);
                }
            }
        }
        Ok(items)
    }
}

fn ensure_place_exists(conn: &Connection, id: PlaceId) -> StoreResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM places WHERE place_uuid = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(StoreError::PlaceNotFound(id))
    }
}

fn next_sort_order(conn: &Connection, place_id: PlaceId) -> StoreResult<i64> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(sort_order), -1) + 1
         FROM items
         WHERE place_uuid = ?1;",
        [place_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(next)
}

fn parse_place_row(row: &Row<'_>) -> StoreResult<Place> {
    let place_uuid: String = row.get("place_uuid")?;
    let place = Place {
        id: parse_uuid(&place_uuid, "places.place_uuid")?,
        name: row.get("name")?,
        image: row.get("image")?,
    };
    place
        .validate()
        .map_err(|err| StoreError::InvalidData(format!("place {place_uuid}: {err}")))?;
    Ok(place)
}

fn parse_item_row(row: &Row<'_>) -> StoreResult<Item> {
    let item_uuid: String = row.get("item_uuid")?;
    let place_uuid: String = row.get("place_uuid")?;
    let x = coordinate(row.get("pos_x")?, "items.pos_x")?;
    let y = coordinate(row.get("pos_y")?, "items.pos_y")?;
    let position = Position::new(x, y)
        .map_err(|err| StoreError::InvalidData(format!("item {item_uuid}: {err}")))?;

    let item = Item {
        id: parse_uuid(&item_uuid, "items.item_uuid")?,
        place_id: parse_uuid(&place_uuid, "items.place_uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        position,
    };
    item.validate()
        .map_err(|err| StoreError::InvalidData(format!("item {item_uuid}: {err}")))?;
    Ok(item)
}

fn coordinate(value: i64, column: &'static str) -> StoreResult<u32> {
    u32::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid coordinate `{value}` in {column}")))
}

fn parse_uuid(value: &str, column: &'static str) -> StoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["places", "items"] {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(StoreError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
