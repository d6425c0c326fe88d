use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Fixed category set for published events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "event_category", rename_all = "snake_case")]
pub enum EventCategory {
    Deportes,
    Musica,
    AireLibre,
    Fiesta,
    Teatro,
    Show,
    Politica,
    Vehiculos,
    Futbol,
    Basket,
    Running,
    Ciclismo,
    Carreras,
    Escenario,
    Ajedrez,
}

impl EventCategory {
    pub const ALL: [EventCategory; 15] = [
        EventCategory::Deportes,
        EventCategory::Musica,
        EventCategory::AireLibre,
        EventCategory::Fiesta,
        EventCategory::Teatro,
        EventCategory::Show,
        EventCategory::Politica,
        EventCategory::Vehiculos,
        EventCategory::Futbol,
        EventCategory::Basket,
        EventCategory::Running,
        EventCategory::Ciclismo,
        EventCategory::Carreras,
        EventCategory::Escenario,
        EventCategory::Ajedrez,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Deportes => "deportes",
            EventCategory::Musica => "musica",
            EventCategory::AireLibre => "aire_libre",
            EventCategory::Fiesta => "fiesta",
            EventCategory::Teatro => "teatro",
            EventCategory::Show => "show",
            EventCategory::Politica => "politica",
            EventCategory::Vehiculos => "vehiculos",
            EventCategory::Futbol => "futbol",
            EventCategory::Basket => "basket",
            EventCategory::Running => "running",
            EventCategory::Ciclismo => "ciclismo",
            EventCategory::Carreras => "carreras",
            EventCategory::Escenario => "escenario",
            EventCategory::Ajedrez => "ajedrez",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for EventCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an event. New events are always `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "event_status", rename_all = "snake_case")]
pub enum EventStatus {
    Active,
    Canceled,
    Finished,
}

/// Reason recorded when an event is canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "event_cancellation_reason", rename_all = "snake_case")]
pub enum EventCancellationReason {
    Clima,
    FuerzaMayor,
    ProblemaTecnico,
    Seguridad,
    BajaAsistencia,
    ConflictoAgenda,
    MotivoPersonal,
    Otro,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    /// Storage key of the cover object, never a URL.
    pub image: String,
    pub status: EventStatus,
    pub category: EventCategory,
    pub event_verified: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub creator_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
