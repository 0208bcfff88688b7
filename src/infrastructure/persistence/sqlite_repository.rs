//! SQLite venue repository
//!
//! Venues and halls use auto-increment ids. Floors, sections, rows and seats
//! are keyed by their UUIDs (stored as text) and carry the parent id plus a
//! `position` column so the tree reloads in insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::application::ports::outbound::{
    HallRepositoryPort, HallUnitOfWork, RepositoryError, VenueRepositoryPort,
};
use crate::domain::entities::{
    NewVenueHall, Venue, VenueHall, VenueHallFloor, VenueHallRow, VenueHallSeat, VenueHallSection,
};
use crate::domain::value_objects::{
    FloorId, HallId, RowId, SeatId, SectionId, TemplateStatus, VenueId,
};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS venues (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS venue_halls (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        venue_id INTEGER NOT NULL REFERENCES venues(id),
        name TEXT NOT NULL,
        total_seats INTEGER NOT NULL CHECK (total_seats >= 0),
        template_status TEXT NOT NULL DEFAULT 'Empty'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS venue_hall_floors (
        id TEXT PRIMARY KEY,
        hall_id INTEGER NOT NULL REFERENCES venue_halls(id),
        label TEXT NOT NULL,
        position INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS venue_hall_sections (
        id TEXT PRIMARY KEY,
        floor_id TEXT NOT NULL REFERENCES venue_hall_floors(id),
        label TEXT NOT NULL,
        position INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS venue_hall_rows (
        id TEXT PRIMARY KEY,
        section_id TEXT NOT NULL REFERENCES venue_hall_sections(id),
        label TEXT NOT NULL,
        position INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS venue_hall_seats (
        id TEXT PRIMARY KEY,
        row_id TEXT NOT NULL REFERENCES venue_hall_rows(id),
        seat_info TEXT NOT NULL,
        start_seat_number INTEGER NOT NULL,
        end_seat_number INTEGER NOT NULL,
        seat_number INTEGER NOT NULL,
        position INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_venue_halls_venue ON venue_halls(venue_id)",
    "CREATE INDEX IF NOT EXISTS idx_floors_hall ON venue_hall_floors(hall_id, position)",
    "CREATE INDEX IF NOT EXISTS idx_sections_floor ON venue_hall_sections(floor_id, position)",
    "CREATE INDEX IF NOT EXISTS idx_rows_section ON venue_hall_rows(section_id, position)",
    "CREATE INDEX IF NOT EXISTS idx_seats_row ON venue_hall_seats(row_id, position)",
];

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn parse_uuid(value: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(value)
        .map_err(|e| RepositoryError::Serialization(format!("Invalid id {}: {}", value, e)))
}

#[derive(FromRow)]
struct HallRecord {
    id: i64,
    venue_id: i64,
    name: String,
    total_seats: i32,
    template_status: String,
}

impl TryFrom<HallRecord> for VenueHall {
    type Error = RepositoryError;

    fn try_from(r: HallRecord) -> Result<Self, Self::Error> {
        let status = r
            .template_status
            .parse::<TemplateStatus>()
            .map_err(RepositoryError::Serialization)?;
        Ok(VenueHall::new(HallId::new(r.id), VenueId::new(r.venue_id), r.name, r.total_seats)
            .with_template_status(status))
    }
}

#[derive(FromRow)]
struct LabelRecord {
    id: String,
    label: String,
}

#[derive(FromRow)]
struct SeatRecord {
    id: String,
    seat_info: String,
    start_seat_number: i32,
    end_seat_number: i32,
    seat_number: i32,
}

const HALL_COLUMNS: &str = "id, venue_id, name, total_seats, template_status";

/// Repository for venues, halls and their seat templates
#[derive(Clone)]
pub struct SqliteVenueRepository {
    pool: SqlitePool,
    template_writes: Arc<Mutex<()>>,
}

impl SqliteVenueRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        Ok(Self {
            pool,
            template_writes: Arc::new(Mutex::new(())),
        })
    }

    async fn load_floors(&self, hall_id: HallId) -> Result<Vec<VenueHallFloor>, RepositoryError> {
        let records: Vec<LabelRecord> = sqlx::query_as(
            "SELECT id, label FROM venue_hall_floors WHERE hall_id = ? ORDER BY position",
        )
        .bind(hall_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut floors = Vec::with_capacity(records.len());
        for record in records {
            let mut floor = VenueHallFloor::new(hall_id, record.label);
            floor.id = FloorId::from_uuid(parse_uuid(&record.id)?);
            for section in self.load_sections(floor.id).await? {
                floor.add_section(section);
            }
            floors.push(floor);
        }
        Ok(floors)
    }

    async fn load_sections(&self, floor_id: FloorId) -> Result<Vec<VenueHallSection>, RepositoryError> {
        let records: Vec<LabelRecord> = sqlx::query_as(
            "SELECT id, label FROM venue_hall_sections WHERE floor_id = ? ORDER BY position",
        )
        .bind(floor_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut sections = Vec::with_capacity(records.len());
        for record in records {
            let mut section = VenueHallSection::new(floor_id, record.label);
            section.id = SectionId::from_uuid(parse_uuid(&record.id)?);
            for row in self.load_rows(section.id).await? {
                section.add_row(row);
            }
            sections.push(section);
        }
        Ok(sections)
    }

    async fn load_rows(&self, section_id: SectionId) -> Result<Vec<VenueHallRow>, RepositoryError> {
        let records: Vec<LabelRecord> = sqlx::query_as(
            "SELECT id, label FROM venue_hall_rows WHERE section_id = ? ORDER BY position",
        )
        .bind(section_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let mut row = VenueHallRow::new(section_id, record.label);
            row.id = RowId::from_uuid(parse_uuid(&record.id)?);
            let seats = self.load_seats(row.id).await?;
            row.add_seats(seats);
            rows.push(row);
        }
        Ok(rows)
    }

    async fn load_seats(&self, row_id: RowId) -> Result<Vec<VenueHallSeat>, RepositoryError> {
        let records: Vec<SeatRecord> = sqlx::query_as(
            "SELECT id, seat_info, start_seat_number, end_seat_number, seat_number
             FROM venue_hall_seats WHERE row_id = ? ORDER BY position",
        )
        .bind(row_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        records
            .into_iter()
            .map(|r| -> Result<VenueHallSeat, RepositoryError> {
                let mut seat = VenueHallSeat::new(
                    row_id,
                    r.seat_info,
                    r.start_seat_number,
                    r.end_seat_number,
                    r.seat_number,
                );
                seat.id = SeatId::from_uuid(parse_uuid(&r.id)?);
                Ok(seat)
            })
            .collect()
    }
}

#[async_trait]
impl VenueRepositoryPort for SqliteVenueRepository {
    async fn register_venue(
        &self,
        name: &str,
        halls: &[NewVenueHall],
    ) -> Result<(Venue, Vec<VenueHall>), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let result = sqlx::query("INSERT INTO venues (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        let venue = Venue::new(VenueId::new(result.last_insert_rowid()), name);

        let mut registered = Vec::with_capacity(halls.len());
        for hall in halls {
            let result = sqlx::query(
                "INSERT INTO venue_halls (venue_id, name, total_seats, template_status) VALUES (?, ?, ?, ?)",
            )
            .bind(venue.id.value())
            .bind(&hall.name)
            .bind(hall.total_seats)
            .bind(TemplateStatus::Empty.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

            registered.push(VenueHall::new(
                HallId::new(result.last_insert_rowid()),
                venue.id,
                hall.name.clone(),
                hall.total_seats,
            ));
        }

        tx.commit().await.map_err(db_err)?;
        tracing::debug!(venue_id = %venue.id, count = registered.len(), "Registered venue halls");
        Ok((venue, registered))
    }

    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>, RepositoryError> {
        let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM venues WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(row.map(|(id, name)| Venue::new(VenueId::new(id), name)))
    }

    async fn list_halls(&self, venue_id: VenueId) -> Result<Vec<VenueHall>, RepositoryError> {
        let records: Vec<HallRecord> = sqlx::query_as(&format!(
            "SELECT {} FROM venue_halls WHERE venue_id = ? ORDER BY id",
            HALL_COLUMNS
        ))
        .bind(venue_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        records.into_iter().map(VenueHall::try_from).collect()
    }

    async fn load_template(&self, id: HallId) -> Result<Option<VenueHall>, RepositoryError> {
        let record: Option<HallRecord> = sqlx::query_as(&format!(
            "SELECT {} FROM venue_halls WHERE id = ?",
            HALL_COLUMNS
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        let Some(record) = record else {
            return Ok(None);
        };
        let mut hall = VenueHall::try_from(record)?;
        for floor in self.load_floors(hall.id).await? {
            hall.add_floor(floor);
        }
        Ok(Some(hall))
    }
}

#[async_trait]
impl HallRepositoryPort for SqliteVenueRepository {
    async fn begin(&self) -> Result<Box<dyn HallUnitOfWork>, RepositoryError> {
        let write_guard = self.template_writes.clone().lock_owned().await;
        let tx = self.pool.begin().await.map_err(db_err)?;
        Ok(Box::new(SqliteHallUnitOfWork {
            tx,
            _write_guard: write_guard,
        }))
    }
}

/// Unit of work backed by a SQLite transaction
///
/// Holds the repository's template write lock so builds in this process do
/// not interleave their read-then-write of the same hall.
pub struct SqliteHallUnitOfWork {
    tx: Transaction<'static, Sqlite>,
    _write_guard: OwnedMutexGuard<()>,
}

impl SqliteHallUnitOfWork {
    async fn insert_floor(&mut self, floor: &VenueHallFloor, position: i64) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO venue_hall_floors (id, hall_id, label, position) VALUES (?, ?, ?, ?)")
            .bind(floor.id.to_string())
            .bind(floor.hall_id.value())
            .bind(&floor.floor)
            .bind(position)
            .execute(&mut *self.tx)
            .await
            .map_err(db_err)?;

        for (section_pos, section) in floor.sections.iter().enumerate() {
            sqlx::query(
                "INSERT INTO venue_hall_sections (id, floor_id, label, position) VALUES (?, ?, ?, ?)",
            )
            .bind(section.id.to_string())
            .bind(floor.id.to_string())
            .bind(&section.section)
            .bind(section_pos as i64)
            .execute(&mut *self.tx)
            .await
            .map_err(db_err)?;

            for (row_pos, row) in section.rows.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO venue_hall_rows (id, section_id, label, position) VALUES (?, ?, ?, ?)",
                )
                .bind(row.id.to_string())
                .bind(section.id.to_string())
                .bind(&row.row)
                .bind(row_pos as i64)
                .execute(&mut *self.tx)
                .await
                .map_err(db_err)?;

                for (seat_pos, seat) in row.seats.iter().enumerate() {
                    sqlx::query(
                        "INSERT INTO venue_hall_seats
                         (id, row_id, seat_info, start_seat_number, end_seat_number, seat_number, position)
                         VALUES (?, ?, ?, ?, ?, ?, ?)",
                    )
                    .bind(seat.id.to_string())
                    .bind(row.id.to_string())
                    .bind(&seat.seat_info)
                    .bind(seat.start_seat_number)
                    .bind(seat.end_seat_number)
                    .bind(seat.seat_number)
                    .bind(seat_pos as i64)
                    .execute(&mut *self.tx)
                    .await
                    .map_err(db_err)?;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl HallUnitOfWork for SqliteHallUnitOfWork {
    async fn find_by_id(&mut self, id: HallId) -> Result<Option<VenueHall>, RepositoryError> {
        let record: Option<HallRecord> = sqlx::query_as(&format!(
            "SELECT {} FROM venue_halls WHERE id = ?",
            HALL_COLUMNS
        ))
        .bind(id.value())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_err)?;

        record.map(VenueHall::try_from).transpose()
    }

    async fn save(&mut self, hall: &VenueHall) -> Result<HallId, RepositoryError> {
        let updated = sqlx::query(
            "UPDATE venue_halls SET name = ?, total_seats = ?, template_status = ? WHERE id = ?",
        )
        .bind(&hall.name)
        .bind(hall.total_seats)
        .bind(hall.template_status.as_str())
        .bind(hall.id.value())
        .execute(&mut *self.tx)
        .await
        .map_err(db_err)?;
        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Hall {}", hall.id)));
        }

        let next_position: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM venue_hall_floors WHERE hall_id = ?",
        )
        .bind(hall.id.value())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_err)?;

        for (offset, floor) in hall.floors.iter().enumerate() {
            self.insert_floor(floor, next_position + offset as i64).await?;
        }

        tracing::debug!(hall_id = %hall.id, floors = hall.floors.len(), "Saved hall aggregate");
        Ok(hall.id)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let this = *self;
        this.tx.commit().await.map_err(db_err)
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        let this = *self;
        this.tx.rollback().await.map_err(db_err)
    }
}
