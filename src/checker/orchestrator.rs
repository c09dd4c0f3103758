//! # Checker Orchestrator
//!
//! Drives the place / check / verify workflows, combining the flag image
//! codec, the placement state store, and the gallery client.
//!
//! ## Failure model
//!
//! Every remote call is a single attempt. A transport error propagates as
//! `Err` and surfaces as the crashed outcome in the binary; a service-level
//! failure terminates the workflow with [`CheckResult::Faulty`] or
//! [`CheckResult::FlagNotFound`]. Steps marked non-fatal (cover uploads,
//! delete confirmations) only log — the listing re-checks that follow them
//! are what decide the outcome.
//!
//! ## Identifiers
//!
//! Gallery names, file names and passwords are fresh random hex tokens per
//! cycle, drawn from a CSPRNG, long enough to be unguessable while the tick
//! is live. Different cycles therefore never collide on the remote side or
//! in the state store.

use anyhow::Result;
use log::{error, info, warn};
use rand::{Rng, RngCore};
use std::fmt;

use crate::client::GalleryClient;
use crate::codec;
use crate::common::{covers, galleries};
use crate::state::{PlacementRecord, StateStore};

/// Outcome vocabulary reported to the game infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// The workflow completed and the service behaved correctly.
    Ok,
    /// The service is up but misbehaving (failed CRUD or listing check).
    Faulty,
    /// The planted flag could not be retrieved intact (verify only).
    FlagNotFound,
}

impl CheckResult {
    /// Process exit code for this outcome. Transport crashes exit with a
    /// separate code chosen by the binary.
    pub fn exit_code(self) -> i32 {
        match self {
            CheckResult::Ok => 0,
            CheckResult::Faulty => 1,
            CheckResult::FlagNotFound => 2,
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckResult::Ok => "OK",
            CheckResult::Faulty => "FAULTY",
            CheckResult::FlagNotFound => "FLAG_NOT_FOUND",
        };
        write!(f, "{}", name)
    }
}

/// Random identifiers for one functional-check probe gallery.
///
/// Generated through [`ProbeIdentifiers::random`] in production; tests
/// construct known values so mock listings can reference them.
#[derive(Debug, Clone)]
pub struct ProbeIdentifiers {
    /// Name of the throwaway gallery.
    pub gallery_name: String,
    /// Name of the throwaway image uploaded into it.
    pub file_name: String,
    /// Password protecting the throwaway gallery.
    pub password: String,
}

impl ProbeIdentifiers {
    /// Fresh random identifiers for one probe cycle.
    pub fn random() -> Self {
        // Variable-length file names make probe uploads look less uniform
        let name_bytes = 8 + rand::thread_rng().gen_range(0..8);
        Self {
            gallery_name: token_hex(16),
            file_name: format!("{}.png", token_hex(name_bytes)),
            password: token_hex(16),
        }
    }
}

/// The per-service checker: one instance drives all three workflows against
/// a single gallery service target.
pub struct GalleryChecker {
    client: GalleryClient,
    state: StateStore,
}

impl GalleryChecker {
    pub fn new(client: GalleryClient, state: StateStore) -> Self {
        Self { client, state }
    }

    /// Workflow A: plant `flag` for `tick`.
    ///
    /// Creates a themed cover gallery, embeds the flag into an image,
    /// persists the placement record (before any upload, so a later verify
    /// can tell "never attempted" from "attempted but unconfirmed"), uploads
    /// cover images, and finally uploads the flag image itself.
    ///
    /// The public flag id is printed to stdout for the game infrastructure
    /// to hand out to attacking teams.
    pub async fn place_flag(&self, tick: u64, flag: &str) -> Result<CheckResult> {
        let gallery_name = token_hex(16);
        let file_name = format!("flag{}.png", token_hex(8));
        let password = token_hex(16);
        let theme = galleries::random_theme();

        if !self
            .client
            .create_gallery(&gallery_name, theme.description, &password)
            .await?
        {
            error!("Gallery creation failed");
            return Ok(CheckResult::Faulty);
        }

        info!("Generating flag image...");
        let artifact = codec::embed_flag(flag)?;

        let record = PlacementRecord {
            gallery_name: gallery_name.clone(),
            file_name: file_name.clone(),
            password,
            sha256_hex: artifact.fingerprint.clone(),
        };
        self.state.put(tick, &record)?;

        println!(
            "{}",
            serde_json::json!({ "gallery": gallery_name, "filename": file_name })
        );

        // Cover traffic; a failed cover upload is cosmetic
        for cover_name in theme.image_names {
            let cover_png = codec::png_bytes(&covers::cover_image(cover_name))?;
            if !self
                .client
                .upload_image(&gallery_name, cover_name, cover_png)
                .await?
            {
                warn!("Cover upload {} failed", cover_name);
            }
        }

        let flag_png = codec::png_bytes(&artifact.image)?;
        if !self
            .client
            .upload_image(&gallery_name, &file_name, flag_png)
            .await?
        {
            error!("Flag image upload failed");
            return Ok(CheckResult::Faulty);
        }

        info!("✅ Flag placed in gallery {} as {}", gallery_name, file_name);
        Ok(CheckResult::Ok)
    }

    /// Workflow B: functional CRUD check with fresh random identifiers.
    pub async fn check_service(&self) -> Result<CheckResult> {
        self.check_service_with(ProbeIdentifiers::random()).await
    }

    /// Workflow B with caller-supplied identifiers.
    ///
    /// Four invariants are asserted, each by re-querying a listing instead
    /// of trusting the status of the call that should have caused it:
    /// gallery creation is visible, an upload is visible, an image delete
    /// removes visibility, and a gallery delete removes visibility.
    pub async fn check_service_with(&self, probe: ProbeIdentifiers) -> Result<CheckResult> {
        let description = galleries::random_description();

        if !self
            .client
            .create_gallery(&probe.gallery_name, &description, &probe.password)
            .await?
        {
            error!("Gallery creation failed");
            return Ok(CheckResult::Faulty);
        }

        if !self.client.gallery_listed(&probe.gallery_name).await? {
            error!("Gallery {} doesn't show up in listing", probe.gallery_name);
            return Ok(CheckResult::Faulty);
        }

        // Upload status deliberately unchecked; the listing re-query decides
        let probe_image = codec::embed_flag(&token_hex(8))?;
        let _ = self
            .client
            .upload_image(
                &probe.gallery_name,
                &probe.file_name,
                codec::png_bytes(&probe_image.image)?,
            )
            .await?;

        if !self
            .client
            .image_listed(&probe.gallery_name, &probe.file_name)
            .await?
        {
            error!("Uploaded file {} is not in gallery listing", probe.file_name);
            return Ok(CheckResult::Faulty);
        }

        // Delete confirmation is logged by the client; only the listing counts
        let _ = self
            .client
            .delete_image(&probe.gallery_name, &probe.file_name, &probe.password)
            .await?;

        if self
            .client
            .image_listed(&probe.gallery_name, &probe.file_name)
            .await?
        {
            error!("Deleted file {} is still in gallery listing", probe.file_name);
            return Ok(CheckResult::Faulty);
        }

        let _ = self
            .client
            .delete_gallery(&probe.gallery_name, &probe.password)
            .await?;

        if self.client.gallery_listed(&probe.gallery_name).await? {
            error!(
                "Deleted gallery {} still shows up in listing",
                probe.gallery_name
            );
            return Ok(CheckResult::Faulty);
        }

        info!("✅ Service check passed");
        Ok(CheckResult::Ok)
    }

    /// Workflow C: verify the flag planted at `tick` is still intact.
    ///
    /// The plain download probes the public retrieval path but its content
    /// is not compared; only the authenticated decrypt result is
    /// fingerprinted against the stored record.
    pub async fn check_flag(&self, tick: u64) -> Result<CheckResult> {
        let Some(record) = self.state.get(tick)? else {
            // Placement never ran or never committed state for this tick
            warn!("Failed to load state for tick {}", tick);
            return Ok(CheckResult::FlagNotFound);
        };

        if self
            .client
            .download_image(&record.gallery_name, &record.file_name)
            .await?
            .is_none()
        {
            error!("Failed to download flag image");
            return Ok(CheckResult::FlagNotFound);
        }

        let Some(decrypted) = self
            .client
            .decrypt_image(&record.gallery_name, &record.file_name, &record.password)
            .await?
        else {
            error!("Failed to decrypt flag image");
            return Ok(CheckResult::FlagNotFound);
        };

        let actual = match codec::fingerprint_bytes(&decrypted) {
            Ok(digest) => digest,
            Err(e) => {
                error!("Decrypted flag image is invalid: {}", e);
                return Ok(CheckResult::FlagNotFound);
            }
        };

        if actual == record.sha256_hex {
            info!("✅ Flag for tick {} verified", tick);
            Ok(CheckResult::Ok)
        } else {
            error!(
                "Flag hash does not match, expected {} got {}",
                record.sha256_hex, actual
            );
            Ok(CheckResult::FlagNotFound)
        }
    }
}

/// Random token of `n_bytes` bytes, hex-encoded, from a CSPRNG.
fn token_hex(n_bytes: usize) -> String {
    let mut bytes = vec![0u8; n_bytes];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        assert_eq!(CheckResult::Ok.exit_code(), 0);
        assert_eq!(CheckResult::Faulty.exit_code(), 1);
        assert_eq!(CheckResult::FlagNotFound.exit_code(), 2);
    }

    #[test]
    fn result_display_matches_protocol_names() {
        assert_eq!(CheckResult::Ok.to_string(), "OK");
        assert_eq!(CheckResult::Faulty.to_string(), "FAULTY");
        assert_eq!(CheckResult::FlagNotFound.to_string(), "FLAG_NOT_FOUND");
    }

    #[test]
    fn token_hex_has_requested_length_and_varies() {
        let a = token_hex(16);
        let b = token_hex(16);
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn probe_identifiers_are_fresh_and_well_formed() {
        let probe = ProbeIdentifiers::random();
        assert_eq!(probe.gallery_name.len(), 32);
        assert_eq!(probe.password.len(), 16 * 2);
        assert!(probe.file_name.ends_with(".png"));
        assert!(probe.file_name.len() >= 16 + 4);
        assert_ne!(probe.gallery_name, ProbeIdentifiers::random().gallery_name);
    }
}
