//! Format listing against canned extractor output.

use async_trait::async_trait;
use std::sync::Arc;
use tubegate_core::{AudioQuality, AudioQualityLabel, MediaKind, MediaVariant, VideoQuality};
use tubegate_error::{MediaError, MediaErrorKind, MediaResult, TubegateErrorKind};
use tubegate_media::{AudioSelection, Catalog, MediaConfig, MediaSource, MediaStream, RawInfo};
use tubegate_token::{TokenConfig, TokenContext, TokenIssuer, TokenVerifier};

const ID: &str = "dQw4w9WgXcQ";

#[derive(Debug)]
struct CannedSource(RawInfo);

#[async_trait]
impl MediaSource for CannedSource {
    async fn fetch_info(&self, url: &str) -> MediaResult<RawInfo> {
        assert_eq!(url, format!("https://www.youtube.com/watch?v={ID}"));
        Ok(self.0.clone())
    }

    async fn open_stream(&self, _args: &[String]) -> MediaResult<MediaStream> {
        Err(MediaError::new(MediaErrorKind::Stream("not used".into())))
    }
}

fn sample_info() -> RawInfo {
    serde_json::from_str(
        r#"{
        "title": "Sample Clip",
        "duration": 125,
        "thumbnail": "https://i.example/t.jpg",
        "uploader": "Someone",
        "formats": [
            {"format_id":"139","vcodec":"none","acodec":"mp4a","abr":48.0,"filesize":500000,"quality":3},
            {"format_id":"140","vcodec":"none","acodec":"mp4a","abr":129.5,"filesize":2000000,"quality":2.6},
            {"format_id":"141","vcodec":"none","acodec":"mp4a","abr":140.0,"filesize":9000000,"quality":1},
            {"format_id":"251","vcodec":"none","acodec":"opus","abr":160.0,"filesize_approx":2500000,"quality":14},
            {"format_id":"160","vcodec":"avc1","acodec":"none","height":144,"width":256,"filesize":100},
            {"format_id":"133","vcodec":"avc1","acodec":"none","height":240,"width":426,"filesize":200},
            {"format_id":"18","vcodec":"avc1","acodec":"mp4a","height":360,"width":640,"resolution":"640x360","filesize":300,"fps":25},
            {"format_id":"134","vcodec":"avc1","acodec":"none","height":360,"width":640,"filesize":9999},
            {"format_id":"136","vcodec":"avc1","acodec":"none","height":720,"width":1280,"filesize":1000,"fps":30},
            {"format_id":"298","vcodec":"avc1","acodec":"none","height":720,"width":1280,"filesize":4000,"fps":60},
            {"format_id":"137","vcodec":"avc1","acodec":"none","height":1080,"width":1920,"tbr":2000},
            {"format_id":"odd","vcodec":"avc1","acodec":"none","height":1088,"width":1920,"filesize":5},
            {"format_id":"sb0","vcodec":"none","acodec":"none","resolution":"storyboard"}
        ]
    }"#,
    )
    .unwrap()
}

fn catalog(info: RawInfo, selection: AudioSelection) -> (Catalog, TokenVerifier) {
    let context = Arc::new(TokenContext::from_config(&TokenConfig::new("catalog-secret")).unwrap());
    let config = MediaConfig {
        audio_selection: selection,
        ..MediaConfig::default()
    };
    let catalog = Catalog::new(
        Arc::new(CannedSource(info)),
        TokenIssuer::new(context.clone()),
        &config,
    );
    (catalog, TokenVerifier::new(context))
}

#[tokio::test]
async fn video_options_one_per_label_highest_first() {
    let (catalog, verifier) = catalog(sample_info(), AudioSelection::BestOnly);
    let info = catalog.describe(ID, MediaKind::Video, "1.2.3.4").await.unwrap();

    let qualities: Vec<_> = info.video_formats.iter().map(|f| f.quality).collect();
    assert_eq!(
        qualities,
        vec![VideoQuality::P1080, VideoQuality::P720, VideoQuality::P360, VideoQuality::P240]
    );
    assert!(info.audio_formats.is_empty());
    assert_eq!(info.raw_formats_count, 13);
    assert_eq!(info.title, "Sample Clip");
    assert_eq!(info.duration_human, "2:05");

    let fhd = &info.video_formats[0];
    assert_eq!(fhd.quality_human, "FHD");
    assert_eq!(fhd.resolution, "1920x1080");
    // 2000 kbps over 125 s
    assert_eq!(fhd.filesize, 2000 * 125 * 1024 / 8);

    let hd = &info.video_formats[1];
    assert_eq!(hd.filesize, 4000);
    assert_eq!(hd.fps, Some(60.0));

    // The muxed rendition wins over a larger video-only one.
    let sd = &info.video_formats[2];
    assert!(sd.has_audio);
    assert_eq!(sd.filesize, 300);
    assert_eq!(sd.quality_human, "");

    for format in &info.video_formats {
        let descriptor = verifier.verify(&format.token, "1.2.3.4").unwrap();
        assert_eq!(descriptor.id(), ID);
        assert_eq!(descriptor.title(), "Sample Clip");
        assert_eq!(*descriptor.variant(), MediaVariant::Video(format.quality));
    }
}

#[tokio::test]
async fn best_only_audio_keeps_largest_bucket() {
    let (catalog, verifier) = catalog(sample_info(), AudioSelection::BestOnly);
    let info = catalog.describe(ID, MediaKind::Audio, "1.2.3.4").await.unwrap();

    assert!(info.video_formats.is_empty());
    assert_eq!(info.audio_formats.len(), 1);
    let best = &info.audio_formats[0];
    // 141 shares the Medium bucket with 140, which came first.
    assert_eq!(best.quality_human, AudioQualityLabel::Medium);
    assert_eq!(best.filesize, 2_000_000);
    assert_eq!(best.quality, AudioQuality::new(3).unwrap());

    let descriptor = verifier.verify(&best.token, "1.2.3.4").unwrap();
    assert_eq!(*descriptor.variant(), MediaVariant::Audio(best.quality));
}

#[tokio::test]
async fn all_audio_buckets_sorted_by_size() {
    let (catalog, _) = catalog(sample_info(), AudioSelection::All);
    let info = catalog.describe(ID, MediaKind::Audio, "1.2.3.4").await.unwrap();

    let labels: Vec<_> = info.audio_formats.iter().map(|f| f.quality_human).collect();
    assert_eq!(
        labels,
        vec![AudioQualityLabel::Medium, AudioQualityLabel::Low]
    );
    assert_eq!(info.audio_formats[0].filesize, 2_000_000);
    assert_eq!(info.audio_formats[1].filesize, 500_000);
    assert_eq!(info.audio_formats[1].filesize_human, "488.28 KB");
}

#[tokio::test]
async fn clamps_out_of_range_extractor_quality() {
    let info: RawInfo = serde_json::from_str(
        r#"{"title":"Loud","duration":10,"formats":[
            {"vcodec":"none","acodec":"opus","abr":250,"filesize":10,"quality":14}
        ]}"#,
    )
    .unwrap();
    let (catalog, _) = catalog(info, AudioSelection::BestOnly);
    let listed = catalog.describe(ID, MediaKind::Audio, "1.2.3.4").await.unwrap();
    assert_eq!(listed.audio_formats[0].quality, AudioQuality::WORST);
    assert_eq!(listed.audio_formats[0].quality_human, AudioQualityLabel::High);
}

#[tokio::test]
async fn playlists_are_refused() {
    let info: RawInfo = serde_json::from_str(r#"{"title":"List","entries":[]}"#).unwrap();
    let (catalog, _) = catalog(info, AudioSelection::BestOnly);
    let err = catalog.describe(ID, MediaKind::Video, "1.2.3.4").await.unwrap_err();
    match err.kind() {
        TubegateErrorKind::Media(e) => assert_eq!(*e.kind(), MediaErrorKind::PlaylistUnsupported),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn invalid_ids_never_reach_the_extractor() {
    let (catalog, _) = catalog(sample_info(), AudioSelection::BestOnly);
    let err = catalog
        .describe("--exec=sh", MediaKind::Video, "1.2.3.4")
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        TubegateErrorKind::Media(e) if matches!(e.kind(), MediaErrorKind::InvalidId(_))
    ));
}

#[test]
fn missing_metadata_defaults() {
    let info: RawInfo = serde_json::from_str(r#"{"formats":[]}"#).unwrap();
    let (catalog, _) = catalog(info.clone(), AudioSelection::BestOnly);
    let listed = catalog.list_formats(ID, MediaKind::Video, &info, "1.2.3.4").unwrap();
    assert_eq!(listed.title, "Unknown");
    assert_eq!(listed.uploader, "Unknown");
    assert_eq!(listed.thumbnail, "");
    assert_eq!(listed.duration, 0);
    assert_eq!(listed.duration_human, "0:00");
    assert!(listed.video_formats.is_empty());
}
