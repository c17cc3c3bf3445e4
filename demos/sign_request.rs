use api_sign::{sign, SignableRequest, SignedQuery};
use serde_json::json;

fn main() -> Result<(), api_sign::SignError> {
    let secret_key = "28fe1173c0144941a15c4e72c8c3a24af2ad9b611627803d5976181469c9ace4";

    // Signing with explicit credentials.
    let request = SignableRequest::new(
            "/api/v1/collections/plants/694f3f5b9f921b1dc00d6537",
            secret_key,
            "dddf3920-f51f-451a-959a-ec58e070853f",
            "1767954570")
        .body(json!({"name": "Snake plant"}));
    println!("Signature: {}", sign(&request)?);

    // GET with query parameters, credentials generated on the spot.
    let get = SignedQuery::generate(
        "/api/v1/reminders",
        secret_key,
        [("limit", "20"), ("page", "1")],
        None,
        None)?;
    println!("GET /api/v1/reminders?{}", get.query_string()?);

    // POST with a JSON body.
    let post = SignedQuery::generate(
        "/api/v1/reminders",
        secret_key,
        std::iter::empty::<(&str, &str)>(),
        Some(json!({"name": "Water plants", "type": "WATERING"}).into()),
        None)?;
    println!("POST /api/v1/reminders?{}", post.query_string()?);

    Ok(())
}
