#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

// BDD-style tests for equipment persistence behaviors, run against a real
// Postgres instance. Clear domain language, GWT structure.

use super::EquipmentDb;
use crate::domain::{
    Bicycle, BicycleId, BicycleStatus, Dock, DockId, DockStatus, NewBicycle, NewDock, Station,
    StationId, TechnicianId,
};

async fn test_db() -> EquipmentDb {
    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| panic!("DATABASE_URL must be set for db tests"));
    EquipmentDb::new(&url)
        .await
        .unwrap_or_else(|e| panic!("Failed to connect: {e}"))
}

async fn setup_schema(db: &EquipmentDb) {
    let statements = [
        "CREATE TABLE IF NOT EXISTS totem (
             id BIGSERIAL PRIMARY KEY,
             localizacao TEXT NOT NULL,
             descricao TEXT NOT NULL
         )",
        "CREATE TABLE IF NOT EXISTS bicicleta (
             id BIGSERIAL PRIMARY KEY,
             numero TEXT,
             status TEXT NOT NULL,
             marca TEXT NOT NULL,
             modelo TEXT NOT NULL,
             ano TEXT NOT NULL,
             localizacao TEXT,
             reparador TEXT
         )",
        "CREATE TABLE IF NOT EXISTS tranca (
             id BIGSERIAL PRIMARY KEY,
             numero TEXT,
             status TEXT NOT NULL,
             modelo TEXT NOT NULL,
             ano TEXT NOT NULL,
             localizacao TEXT,
             reparador TEXT,
             bicicleta_id BIGINT UNIQUE REFERENCES bicicleta(id),
             totem_id BIGINT REFERENCES totem(id)
         )",
    ];
    for statement in statements {
        sqlx::query(statement)
            .execute(db.pool())
            .await
            .unwrap_or_else(|e| panic!("schema setup failed: {e}"));
    }
}

async fn reset_tables(db: &EquipmentDb) {
    sqlx::query("TRUNCATE tranca, bicicleta, totem RESTART IDENTITY CASCADE")
        .execute(db.pool())
        .await
        .unwrap_or_else(|e| panic!("reset failed: {e}"));
}

fn sample_bicycle() -> Bicycle {
    Bicycle::new(NewBicycle {
        brand: "Caloi".to_string(),
        model: "Ceci".to_string(),
        year: "2021".to_string(),
        location: None,
    })
    .unwrap()
}

fn sample_dock() -> Dock {
    Dock::new(NewDock {
        model: "Titanium".to_string(),
        year: "2022".to_string(),
        location: None,
    })
    .unwrap()
}

mod equipment_persistence {

    mod when_registering_a_bicycle {
        use super::super::*;

        #[tokio::test]
        #[ignore = "requires DATABASE_URL"]
        async fn then_the_assigned_id_survives_a_reload() {
            // Given
            let db = test_db().await;
            setup_schema(&db).await;
            reset_tables(&db).await;

            // When
            let mut bicycle = db.create_bicycle(sample_bicycle()).await.unwrap();
            bicycle.assign_number().unwrap();
            db.update_bicycle(&bicycle).await.unwrap();

            // Then
            let id = bicycle.id().unwrap();
            let loaded = db.fetch_bicycle(id).await.unwrap().unwrap();
            assert_eq!(loaded.number(), Some(format!("BIC-{}", id.value()).as_str()));
            assert_eq!(loaded.status(), BicycleStatus::New);
            assert_eq!(db.fetch_bicycles().await.unwrap(), vec![loaded]);
        }
    }

    mod when_updating_a_missing_row {
        use super::super::*;

        #[tokio::test]
        #[ignore = "requires DATABASE_URL"]
        async fn then_the_update_is_reported_as_not_found() {
            // Given
            let db = test_db().await;
            setup_schema(&db).await;
            reset_tables(&db).await;
            let phantom = Bicycle::from_parts(
                Some(BicycleId::new(999)),
                Some("BIC-999".to_string()),
                BicycleStatus::New,
                "Caloi".to_string(),
                "Ceci".to_string(),
                "2021".to_string(),
                None,
                None,
            );

            // When / Then
            let result = db.update_bicycle(&phantom).await;
            assert!(matches!(
                result,
                Err(crate::error::FleetError::NotFound(_))
            ));
        }
    }

    mod when_docking_a_bicycle {
        use super::super::*;

        #[tokio::test]
        #[ignore = "requires DATABASE_URL"]
        async fn then_both_rows_commit_together() {
            // Given
            let db = test_db().await;
            setup_schema(&db).await;
            reset_tables(&db).await;
            let mut bicycle = db.create_bicycle(sample_bicycle()).await.unwrap();
            let mut dock = db.create_dock(sample_dock()).await.unwrap();
            bicycle.set_status_unchecked(BicycleStatus::Available);
            dock.set_status_unchecked(DockStatus::Occupied);
            dock.bind_bicycle(bicycle.id().unwrap());

            // When
            db.update_bicycle_and_dock(&bicycle, &dock).await.unwrap();

            // Then
            let held_by = db
                .find_dock_holding_bicycle(bicycle.id().unwrap())
                .await
                .unwrap();
            assert_eq!(held_by, Some(dock.id().unwrap().value()));
            let loaded = db.fetch_dock(dock.id().unwrap()).await.unwrap().unwrap();
            assert_eq!(loaded.status(), DockStatus::Occupied);
        }

        #[tokio::test]
        #[ignore = "requires DATABASE_URL"]
        async fn then_a_failed_pair_write_leaves_no_partial_state() {
            // Given
            let db = test_db().await;
            setup_schema(&db).await;
            reset_tables(&db).await;
            let bicycle = db.create_bicycle(sample_bicycle()).await.unwrap();
            let phantom_dock = Dock::from_parts(
                Some(DockId::new(999)),
                Some("TR-999".to_string()),
                DockStatus::Occupied,
                "Titanium".to_string(),
                "2022".to_string(),
                None,
                None,
                bicycle.id(),
                None,
            );
            let mut changed = bicycle.clone();
            changed.set_status_unchecked(BicycleStatus::Available);

            // When
            let result = db.update_bicycle_and_dock(&changed, &phantom_dock).await;

            // Then
            assert!(result.is_err());
            let reloaded = db
                .fetch_bicycle(bicycle.id().unwrap())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(reloaded.status(), BicycleStatus::New);
        }
    }

    mod when_listing_a_station {
        use super::super::*;

        #[tokio::test]
        #[ignore = "requires DATABASE_URL"]
        async fn then_docks_and_custody_fields_round_trip() {
            // Given
            let db = test_db().await;
            setup_schema(&db).await;
            reset_tables(&db).await;
            let station = db
                .create_station(Station::new("Av. Atlantica 100", "west side hub").unwrap())
                .await
                .unwrap();
            let station_id = station.id().unwrap();
            let mut dock = db.create_dock(sample_dock()).await.unwrap();
            dock.return_to_network(station_id, &TechnicianId::new("m-1"))
                .unwrap();
            db.update_dock(&dock).await.unwrap();

            // When
            let docks = db.fetch_docks_at_station(station_id).await.unwrap();

            // Then
            assert_eq!(docks.len(), 1);
            assert_eq!(docks[0].status(), DockStatus::Free);
            assert_eq!(docks[0].station(), Some(station_id));
            assert!(db.has_station(station_id).await.unwrap());
            assert!(!db.has_station(StationId::new(999)).await.unwrap());
            assert_eq!(db.fetch_docks().await.unwrap(), docks);
        }
    }

    mod when_removing_a_station {
        use super::super::*;

        #[tokio::test]
        #[ignore = "requires DATABASE_URL"]
        async fn then_the_row_is_gone_for_good() {
            // Given
            let db = test_db().await;
            setup_schema(&db).await;
            reset_tables(&db).await;
            let station = db
                .create_station(Station::new("Av. Atlantica 100", "west side hub").unwrap())
                .await
                .unwrap();
            let id = station.id().unwrap();

            // When
            db.remove_station(id).await.unwrap();

            // Then
            assert!(db.fetch_station(id).await.unwrap().is_none());
            assert!(db.fetch_stations().await.unwrap().is_empty());
        }
    }
}
