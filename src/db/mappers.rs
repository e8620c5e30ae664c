#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{
    Bicycle, BicycleId, BicycleStatus, Dock, DockId, DockStatus, Station, StationId, TechnicianId,
};
use crate::error::{FleetError, Result};

/// id, numero, status, marca, modelo, ano, localizacao, reparador
pub type BicycleRow = (
    i64,
    Option<String>,
    String,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
);

/// id, numero, status, modelo, ano, localizacao, reparador, bicicleta_id, totem_id
pub type DockRow = (
    i64,
    Option<String>,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<i64>,
    Option<i64>,
);

/// id, localizacao, descricao
pub type StationRow = (i64, String, String);

pub fn parse_bicycle(row: BicycleRow) -> Result<Bicycle> {
    let (id, number, status, brand, model, year, location, repairer) = row;
    let status = BicycleStatus::try_from(status.as_str()).map_err(FleetError::Database)?;
    Ok(Bicycle::from_parts(
        Some(BicycleId::new(id)),
        number,
        status,
        brand,
        model,
        year,
        location,
        repairer.map(TechnicianId::new),
    ))
}

pub fn parse_dock(row: DockRow) -> Result<Dock> {
    let (id, number, status, model, year, location, repairer, bicycle, station) = row;
    let status = DockStatus::try_from(status.as_str()).map_err(FleetError::Database)?;
    Ok(Dock::from_parts(
        Some(DockId::new(id)),
        number,
        status,
        model,
        year,
        location,
        repairer.map(TechnicianId::new),
        bicycle.map(BicycleId::new),
        station.map(StationId::new),
    ))
}

pub fn parse_station(row: StationRow) -> Station {
    let (id, location, description) = row;
    Station::from_parts(Some(StationId::new(id)), location, description)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn bicycle_rows_round_trip_through_the_status_vocabulary() {
        let bicycle = parse_bicycle((
            4,
            Some("BIC-4".to_string()),
            "in_repair".to_string(),
            "Caloi".to_string(),
            "Ceci".to_string(),
            "2021".to_string(),
            None,
            Some("m-1".to_string()),
        ))
        .unwrap();
        assert_eq!(bicycle.status(), BicycleStatus::InRepair);
        assert_eq!(bicycle.repairer(), Some(&TechnicianId::new("m-1")));
    }

    #[test]
    fn unknown_status_text_is_a_database_error() {
        let result = parse_dock((
            1,
            None,
            "rusted".to_string(),
            "Titanium".to_string(),
            "2022".to_string(),
            None,
            None,
            None,
            None,
        ));
        assert!(matches!(result, Err(FleetError::Database(_))));
    }
}
