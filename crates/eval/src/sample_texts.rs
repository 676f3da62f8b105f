use serde::{Deserialize, Serialize};

/// One benchmark passage with phrases a good enrichment run should surface
/// somewhere in its keyphrases or matched page titles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplePassage {
    pub name: String,
    pub text: String,
    pub expected_phrases: Vec<String>,
}

pub fn get_sample_passages() -> Vec<SamplePassage> {
    vec![
        SamplePassage {
            name: "siberian-puppy".to_string(),
            text: "Researchers are trying to determine whether an 18,000-year-old \
                   puppy found in Siberia is a dog or a wolf. The canine - which was \
                   two months old when it died - has been remarkably preserved in the \
                   permafrost of the Russian region, with its fur, nose and teeth all \
                   intact. DNA sequencing has been unable to determine the species. \
                   Scientists say that could mean the specimen represents an \
                   evolutionary link between wolves and modern dogs."
                .to_string(),
            expected_phrases: vec![
                "dog".to_string(),
                "wolf".to_string(),
                "permafrost".to_string(),
            ],
        },
        SamplePassage {
            name: "iraq-intelligence".to_string(),
            text: "U.S. intelligence cannot say conclusively that Saddam Hussein has \
                   weapons of mass destruction, an information gap that is \
                   complicating White House efforts to build support for an attack on \
                   Saddam's Iraqi regime. The CIA has advised top administration \
                   officials to assume that Iraq has some weapons of mass \
                   destruction. But the agency has not given President Bush a \
                   \"smoking gun,\" according to U.S. intelligence and administration \
                   officials."
                .to_string(),
            expected_phrases: vec![
                "iraq".to_string(),
                "intelligence".to_string(),
                "weapons".to_string(),
            ],
        },
        SamplePassage {
            name: "gene-therapy".to_string(),
            text: "The development of T-cell leukaemia following the otherwise \
                   successful treatment of three patients with X-linked severe \
                   combined immune deficiency (X-SCID) in gene-therapy trials using \
                   haematopoietic stem cells has led to a re-evaluation of this \
                   approach. Using a mouse model for gene therapy of X-SCID, we find \
                   that the corrective therapeutic gene IL2RG itself can act as a \
                   contributor to the genesis of T-cell lymphomas, with one-third of \
                   animals being affected. Gene-therapy trials for X-SCID, which have \
                   been based on the assumption that IL2RG is minimally oncogenic, \
                   may therefore pose some risk to patients."
                .to_string(),
            expected_phrases: vec![
                "gene".to_string(),
                "therapy".to_string(),
                "leukaemia".to_string(),
            ],
        },
        SamplePassage {
            name: "market-pandemic".to_string(),
            text: "Share markets in the US plummeted on Wednesday, with losses \
                   accelerating after the World Health Organization declared the \
                   coronavirus outbreak a pandemic."
                .to_string(),
            expected_phrases: vec![
                "coronavirus".to_string(),
                "pandemic".to_string(),
                "markets".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_set_is_complete() {
        let passages = get_sample_passages();
        assert_eq!(passages.len(), 4);
        for passage in &passages {
            assert!(!passage.text.trim().is_empty());
            assert!(!passage.expected_phrases.is_empty());
        }
    }
}
