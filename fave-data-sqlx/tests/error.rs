use fave_data::DataError;
use fave_data_sqlx::SqlxErrorExt;

#[test]
fn row_not_found_maps_to_not_found() {
    let err = sqlx::Error::RowNotFound.into_data_error();
    assert!(matches!(err, DataError::NotFound(_)));
}

#[test]
fn column_not_found_maps_to_decode() {
    let err = sqlx::Error::ColumnNotFound("time".into()).into_data_error();
    assert!(matches!(err, DataError::Decode(msg) if msg.contains("time")));
}

#[test]
fn other_errors_keep_their_source() {
    let err = sqlx::Error::PoolTimedOut.into_data_error();
    assert!(matches!(err, DataError::Database(_)));
    assert!(std::error::Error::source(&err).is_some());
}
