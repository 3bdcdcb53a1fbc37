use super::*;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn storage() -> Storage {
    let storage = Storage::in_memory().await.unwrap();
    storage.initialize().await.unwrap();
    storage
}

fn stay(name: &str, arrival: &str, departure: &str) -> NewBooking {
    NewBooking::new(name, "07700 900123", d(arrival), d(departure))
}

#[actix_web::test]
async fn create_then_list_returns_inserted_fields() {
    let storage = storage().await;
    let id = storage
        .create_booking(
            &stay("Ada", "2024-06-01", "2024-06-07")
                .with_notes("late check-in")
                .with_email("ada@example.com"),
        )
        .await
        .unwrap();

    let bookings = storage.list_bookings(None).await.unwrap();
    assert_eq!(
        bookings,
        vec![Booking {
            id,
            name: "Ada".into(),
            phone: "07700 900123".into(),
            email: Some("ada@example.com".into()),
            arrival_date: d("2024-06-01"),
            departure_date: d("2024-06-07"),
            notes: Some("late check-in".into()),
        }]
    );
}

#[actix_web::test]
async fn optional_fields_default_to_absent() {
    let storage = storage().await;
    let id = storage
        .create_booking(&stay("Ada", "2024-06-01", "2024-06-02"))
        .await
        .unwrap();

    let booking = storage.get_booking(id).await.unwrap().unwrap();
    assert_eq!(booking.email, None);
    assert_eq!(booking.notes, None);
}

#[actix_web::test]
async fn ids_are_fresh_and_never_reused() {
    let storage = storage().await;
    let first = storage
        .create_booking(&stay("Ada", "2024-06-01", "2024-06-02"))
        .await
        .unwrap();
    let second = storage
        .create_booking(&stay("Grace", "2024-07-01", "2024-07-02"))
        .await
        .unwrap();
    assert_ne!(first, second);

    storage.remove_booking(second).await.unwrap();
    let third = storage
        .create_booking(&stay("Alan", "2024-08-01", "2024-08-02"))
        .await
        .unwrap();
    assert!(third > second);
}

#[actix_web::test]
async fn remove_is_idempotent() {
    let storage = storage().await;
    let keep = storage
        .create_booking(&stay("Ada", "2024-06-01", "2024-06-02"))
        .await
        .unwrap();
    let gone = storage
        .create_booking(&stay("Grace", "2024-07-01", "2024-07-02"))
        .await
        .unwrap();

    storage.remove_booking(gone).await.unwrap();
    storage.remove_booking(gone).await.unwrap();
    storage.remove_booking(9_999).await.unwrap();

    let ids: Vec<i64> = storage
        .list_bookings(None)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec![keep]);
    assert!(storage.get_booking(gone).await.unwrap().is_none());
}

#[actix_web::test]
async fn after_date_filter_is_strict() {
    let storage = storage().await;
    for (name, arrival, departure) in [
        ("before", "2024-05-30", "2024-06-02"),
        ("same-day", "2024-06-01", "2024-06-03"),
        ("after", "2024-06-02", "2024-06-04"),
        ("much-later", "2025-01-10", "2025-01-12"),
    ] {
        storage
            .create_booking(&stay(name, arrival, departure))
            .await
            .unwrap();
    }

    let cutoff = d("2024-06-01");
    let all = storage.list_bookings(None).await.unwrap();
    let filtered = storage.list_bookings(Some(cutoff)).await.unwrap();

    let expected: Vec<Booking> = all
        .into_iter()
        .filter(|b| b.arrival_date > cutoff)
        .collect();
    assert_eq!(filtered, expected);
    let names: Vec<&str> = filtered.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["after", "much-later"]);
}

#[actix_web::test]
async fn booked_ranges_cover_every_booking() {
    let storage = storage().await;
    storage
        .create_booking(&stay("Ada", "2024-06-01", "2024-06-03"))
        .await
        .unwrap();
    // Reversed stays are stored as given.
    storage
        .create_booking(&stay("Grace", "2024-07-05", "2024-07-01"))
        .await
        .unwrap();

    let mut ranges = storage.list_booked_ranges().await.unwrap();
    ranges.sort();
    assert_eq!(
        ranges,
        vec![
            (d("2024-06-01"), d("2024-06-03")),
            (d("2024-07-05"), d("2024-07-01")),
        ]
    );
}

#[actix_web::test]
async fn store_rejects_missing_required_fields() {
    let storage = storage().await;

    let err = storage
        .create_booking(&NewBooking::new("Ada", "", d("2024-06-01"), d("2024-06-02")))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation { field: "phone" }));

    let mut no_departure = stay("Ada", "2024-06-01", "2024-06-02");
    no_departure.departure_date = None;
    let err = storage.create_booking(&no_departure).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::Validation {
            field: "departure_date"
        }
    ));

    assert!(storage.list_bookings(None).await.unwrap().is_empty());
}

#[actix_web::test]
async fn initialize_twice_keeps_rows() {
    let storage = storage().await;
    storage
        .create_booking(&stay("Ada", "2024-06-01", "2024-06-02"))
        .await
        .unwrap();

    storage.initialize().await.unwrap();
    assert_eq!(storage.list_bookings(None).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn unopenable_database_is_unavailable() {
    let err = Storage::connect("sqlite:///definitely/not/a/real/dir/bookings.sqlite3", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
}

#[actix_web::test]
async fn closed_storage_is_unavailable() {
    let storage = storage().await;
    storage.close().await;
    let err = storage.list_bookings(None).await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
}
