use reqwest::multipart::{Form, Part};
use zkwasm_types::AddImageParams;

/// Builds the multipart form of `POST /setup` from the image metadata, the WASM bytes and the
/// user's signature over the metadata (see `zkwasm_util::message`).
pub fn add_image_form(
    params: &AddImageParams,
    image: Vec<u8>,
    signature: impl Into<String>,
) -> Form {
    let image = Part::bytes(image).file_name(format!("{}.wasm", params.name));
    Form::new()
        .text("name", params.name.clone())
        .text("image_md5", params.image_md5.clone())
        .text("user_address", params.user_address.clone())
        .text("description_url", params.description_url.clone())
        .text("avator_url", params.avator_url.clone())
        .text("circuit_size", params.circuit_size.to_string())
        .text("signature", signature.into())
        .part("image", image)
}
