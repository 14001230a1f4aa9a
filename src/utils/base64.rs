use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

const INDIFFERENT_PADDING: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STANDARD_LENIENT: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, INDIFFERENT_PADDING);

const URL_SAFE_LENIENT: GeneralPurpose =
    GeneralPurpose::new(&alphabet::URL_SAFE, INDIFFERENT_PADDING);

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a Base64 string to its original form.
///
/// Padding is optional and embedded whitespace (line-wrapped payloads) is
/// ignored.
///
/// # Arguments
/// * `input` - The Base64 encoded string.
/// * `accept_urlsafe` - Whether to retry with the URL-safe alphabet when the
///   standard alphabet fails.
///
/// # Returns
/// The decoded string, or `None` if the input is not Base64 or does not
/// decode to valid UTF-8.
pub fn base64_decode(input: &str, accept_urlsafe: bool) -> Option<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = match STANDARD_LENIENT.decode(&compact) {
        Ok(bytes) => bytes,
        Err(_) if accept_urlsafe => URL_SAFE_LENIENT.decode(&compact).ok()?,
        Err(_) => return None,
    };

    String::from_utf8(bytes).ok()
}
