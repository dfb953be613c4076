#!/usr/bin/env cargo
use days_api::openapi::DaysV1ApiDoc;

fn main() {
    let openapi = DaysV1ApiDoc::openapi();
    let json = serde_json::to_string_pretty(&openapi)
        .expect("Failed to serialize OpenAPI spec to JSON");

    println!("{}", json);
}
