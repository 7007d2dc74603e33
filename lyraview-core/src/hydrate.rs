use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::model::{ImageKind, ImageReference, ResolvedAsset};
use crate::source::AssetSource;

static GENERATED_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[IMAGE:\s*([^\]]+)\]").expect("valid regex"));
static UPLOADED_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[UPLOADED IMAGE:\s*([^\]]+)\]").expect("valid regex"));
static LEGACY_SHARED_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[Shared image:\s*([^\]]+)\]").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagClass {
    Generated,
    Uploaded,
    LegacyShared,
}

/// Scan a message body for all three image tag encodings.
///
/// Tags are evaluated in fixed priority order (generated, uploaded,
/// legacy shared); the returned references are in document order of
/// their tokens so multi-image bodies substitute front to back.
pub fn scan_image_references(body: &str) -> Vec<ImageReference> {
    let patterns = [
        (&*GENERATED_TAG_RE, TagClass::Generated),
        (&*UPLOADED_TAG_RE, TagClass::Uploaded),
        (&*LEGACY_SHARED_TAG_RE, TagClass::LegacyShared),
    ];

    let mut found = Vec::new();
    for (pattern, tag) in patterns {
        for caps in pattern.captures_iter(body) {
            let token = caps.get(0).map_or_else(String::new, |m| m.as_str().to_string());
            let start = caps.get(0).map_or(0, |m| m.start());
            let raw_path = caps[1].trim().to_string();

            found.push((
                start,
                ImageReference {
                    kind: classify_kind(tag, &raw_path),
                    raw_path,
                    raw_token: token,
                },
            ));
        }
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, reference)| reference).collect()
}

/// Provenance is decided by the path, not the tag: upload-marked paths
/// are `Uploaded` regardless of which tag carried them.
fn classify_kind(tag: TagClass, path: &str) -> ImageKind {
    if path.contains("uploaded_images") || path.contains("upload_") {
        return ImageKind::Uploaded;
    }

    match tag {
        TagClass::LegacyShared => ImageKind::LegacySharedUploaded,
        TagClass::Generated | TagClass::Uploaded => ImageKind::Generated,
    }
}

fn mime_for_path(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Resolve one reference through the asset collaborator.
///
/// Every failure mode collapses into an absent `asset_url`; the caller
/// substitutes a placeholder and moves on.
pub async fn resolve_reference(
    assets: &dyn AssetSource,
    reference: &ImageReference,
) -> ResolvedAsset {
    let asset_url = match assets.read_base64(&reference.raw_path).await {
        Ok(payload) if !payload.trim().is_empty() => Some(format!(
            "data:{};base64,{}",
            mime_for_path(&reference.raw_path),
            payload
        )),
        Ok(_) => {
            warn!(path = %reference.raw_path, "asset resolution returned empty payload");
            None
        }
        Err(err) => {
            warn!(path = %reference.raw_path, error = %err, "asset resolution failed");
            None
        }
    };

    ResolvedAsset {
        raw_path: reference.raw_path.clone(),
        asset_url,
    }
}

/// Render the block that takes the token's place in the body.
pub fn substitution_for(reference: &ImageReference, asset: &ResolvedAsset) -> String {
    match &asset.asset_url {
        Some(url) => inline_image_block(reference, url),
        None => fallback_block(reference),
    }
}

fn inline_image_block(reference: &ImageReference, asset_url: &str) -> String {
    let (color, label) = match reference.kind {
        ImageKind::Generated => ("#8b5cf6", "✨ Generated image"),
        ImageKind::Uploaded => ("#3b82f6", "📎 Uploaded image"),
        ImageKind::LegacySharedUploaded => ("#6b7280", "📎 Shared image"),
    };

    format!(
        "<div class=\"inline-image {kind}\" style=\"border-color: {color};\">\
<img src=\"{asset_url}\" alt=\"{label}\" onclick=\"openFullImage('{path}')\">\
<span class=\"inline-image-label\">{label}</span></div>",
        kind = reference.kind,
        path = reference.raw_path,
    )
}

fn fallback_block(reference: &ImageReference) -> String {
    format!(
        "<div class=\"inline-image missing\">🖼️ Image unavailable: {}</div>",
        basename(&reference.raw_path)
    )
}

/// Replace the first remaining occurrence of the token.
///
/// Each scanned occurrence gets its own reference, so front-to-back
/// single replacements cover repeated tokens; a token that is already
/// gone makes this a no-op. Substitution is literal, so a resolved URL
/// that happens to contain another unresolved token can collide — a
/// documented risk of the format, not guarded against.
pub fn apply_substitution(body: &str, reference: &ImageReference, replacement: &str) -> String {
    body.replacen(&reference.raw_token, replacement, 1)
}
