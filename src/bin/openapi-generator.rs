//! Prints the OpenAPI document for the REST API to stdout.

use trail_quiz_back::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let doc = ApiDoc::openapi();
    println!("{}", doc.to_pretty_json().expect("serializing OpenAPI document"));
}
