use chrono::{Duration, Utc};

use bp_tracker_domain::entities::{Category, CreateReadingRequest, UpdateReadingRequest};
use bp_tracker_domain::services::{create_default_reading_service, ReadingServiceError};

// Initialize tracing once for all tests
static INIT: std::sync::Once = std::sync::Once::new();
fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_test_writer()
            .try_init();
    });
}

fn request(systolic: u16, diastolic: u16, pulse: Option<u16>, minutes_ago: i64) -> CreateReadingRequest {
    CreateReadingRequest {
        systolic,
        diastolic,
        pulse,
        notes: None,
        measured_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

#[tokio::test]
async fn test_reading_lifecycle() -> anyhow::Result<()> {
    initialize();

    let service = create_default_reading_service();

    let created = service
        .create_reading(CreateReadingRequest {
            notes: Some("after morning coffee".to_string()),
            ..request(132, 84, Some(78), 60)
        })
        .await?;
    assert_eq!(created.systolic, 132);
    assert_eq!(created.diastolic, 84);
    assert_eq!(created.notes.as_deref(), Some("after morning coffee"));

    let fetched = service.get_reading_by_id(created.id).await?;
    assert_eq!(fetched, created);

    // Partial update keeps every field the request does not mention
    let updated = service
        .update_reading(
            created.id,
            UpdateReadingRequest {
                systolic: Some(128),
                pulse: Some(74),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.systolic, 128);
    assert_eq!(updated.diastolic, 84);
    assert_eq!(updated.pulse, Some(74));
    assert_eq!(updated.notes.as_deref(), Some("after morning coffee"));

    service.delete_reading(created.id).await?;

    let missing = service.get_reading_by_id(created.id).await;
    assert!(matches!(missing, Err(ReadingServiceError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_latest_and_pagination() -> anyhow::Result<()> {
    initialize();

    let service = create_default_reading_service();

    for i in 0..25 {
        service.create_reading(request(120, 80, None, 10 + i * 30)).await?;
    }
    let newest = service.create_reading(request(135, 88, Some(70), 5)).await?;

    let latest = service.latest_reading().await?;
    assert_eq!(latest.map(|r| r.id), Some(newest.id));

    // Default page size caps the first page
    let (page, total) = service
        .get_filtered_readings(None, None, None, None, None)
        .await?;
    assert_eq!(total, 26);
    assert_eq!(page.len(), 20);
    assert_eq!(page[0].id, newest.id);

    // Remaining readings on the second page
    let (rest, _) = service
        .get_filtered_readings(None, None, None, Some(20), None)
        .await?;
    assert_eq!(rest.len(), 6);

    // Oldest first when ascending order is requested
    let (ascending, _) = service
        .get_filtered_readings(None, None, Some(1000), None, Some(false))
        .await?;
    assert!(ascending.first().unwrap().measured_at <= ascending.last().unwrap().measured_at);
    assert_eq!(ascending.last().unwrap().id, newest.id);

    Ok(())
}

#[tokio::test]
async fn test_validation_surfaces_through_service() {
    initialize();

    let service = create_default_reading_service();

    // Out-of-range systolic
    let result = service.create_reading(request(40, 30, None, 10)).await;
    assert!(matches!(result, Err(ReadingServiceError::Validation(_))));

    // Systolic not above diastolic
    let result = service.create_reading(request(90, 90, None, 10)).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("greater than"));

    // Future measurement time
    let result = service
        .create_reading(CreateReadingRequest {
            measured_at: Utc::now() + Duration::hours(2),
            ..request(120, 80, None, 0)
        })
        .await;
    assert!(matches!(result, Err(ReadingServiceError::Validation(_))));

    // Nothing invalid was stored
    assert!(service.get_all_readings().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_categorized_history_through_service() -> anyhow::Result<()> {
    initialize();

    let service = create_default_reading_service();

    service.create_reading(request(115, 75, Some(62), 180)).await?;
    service.create_reading(request(150, 95, Some(74), 120)).await?;
    let crisis = service.create_reading(request(185, 95, Some(88), 60)).await?;

    let history = service.categorized_history().await?;
    assert_eq!(history.len(), 3);

    // Newest first, each entry carrying its derived category
    assert_eq!(history[0].reading.id, crisis.id);
    assert_eq!(history[0].category, Category::Crisis);
    assert_eq!(history[1].category, Category::Stage2);
    assert_eq!(history[2].category, Category::Normal);

    assert!(service.is_crisis(&history[0].reading));
    assert!(!service.is_crisis(&history[2].reading));

    Ok(())
}
