//! Common types shared across Nimbus Cognition services.

use serde::{Deserialize, Serialize};

// ==================== Audio Format ====================

/// Audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// Raw 16-bit linear PCM.
    #[default]
    Pcm,
    /// WAV container.
    Wav,
    /// MP3 format.
    Mp3,
    /// FLAC format.
    Flac,
    /// Ogg container with Opus frames.
    Ogg,
}

impl AudioFormat {
    /// Returns the wire name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Pcm => "pcm",
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
            AudioFormat::Ogg => "ogg",
        }
    }

    /// Returns the MIME content type for this format at the given sample rate.
    ///
    /// Raw PCM requires the rate in the type; container formats carry it
    /// themselves.
    pub fn content_type(&self, sample_rate: SampleRate) -> String {
        match self {
            AudioFormat::Pcm => format!("audio/l16;rate={}", sample_rate.as_i32()),
            AudioFormat::Wav => "audio/wav".to_string(),
            AudioFormat::Mp3 => "audio/mp3".to_string(),
            AudioFormat::Flac => "audio/flac".to_string(),
            AudioFormat::Ogg => "audio/ogg;codecs=opus".to_string(),
        }
    }
}

// ==================== Sample Rate ====================

/// Audio sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleRate {
    /// 8 kHz (telephony).
    #[serde(rename = "8000")]
    Rate8k,
    /// 16 kHz (broadband).
    #[default]
    #[serde(rename = "16000")]
    Rate16k,
    /// 22.05 kHz.
    #[serde(rename = "22050")]
    Rate22k,
    /// 44.1 kHz.
    #[serde(rename = "44100")]
    Rate44k,
}

impl SampleRate {
    /// Returns the rate in Hz.
    pub fn as_i32(&self) -> i32 {
        match self {
            SampleRate::Rate8k => 8000,
            SampleRate::Rate16k => 16000,
            SampleRate::Rate22k => 22050,
            SampleRate::Rate44k => 44100,
        }
    }
}

// ==================== Language ====================

/// Language tag used by speech and translation services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    /// US English.
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// British English.
    #[serde(rename = "en-GB")]
    EnGb,
    /// Spanish.
    #[serde(rename = "es-ES")]
    EsEs,
    /// French.
    #[serde(rename = "fr-FR")]
    FrFr,
    /// German.
    #[serde(rename = "de-DE")]
    DeDe,
    /// Brazilian Portuguese.
    #[serde(rename = "pt-BR")]
    PtBr,
    /// Japanese.
    #[serde(rename = "ja-JP")]
    JaJp,
    /// Mandarin Chinese.
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Language {
    /// Returns the wire tag of the language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::EnUs => "en-US",
            Language::EnGb => "en-GB",
            Language::EsEs => "es-ES",
            Language::FrFr => "fr-FR",
            Language::DeDe => "de-DE",
            Language::PtBr => "pt-BR",
            Language::JaJp => "ja-JP",
            Language::ZhCn => "zh-CN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(
            AudioFormat::Pcm.content_type(SampleRate::Rate16k),
            "audio/l16;rate=16000"
        );
        assert_eq!(AudioFormat::Wav.content_type(SampleRate::Rate8k), "audio/wav");
    }

    #[test]
    fn test_language_serde() {
        let tag: Language = serde_json::from_str("\"pt-BR\"").unwrap();
        assert_eq!(tag, Language::PtBr);
        assert_eq!(serde_json::to_string(&Language::ZhCn).unwrap(), "\"zh-CN\"");
    }
}
