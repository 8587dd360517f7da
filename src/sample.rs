/// A record of categorical feature values, optionally carrying its class label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub features: Vec<String>,
    pub label: Option<String>,
}

impl Sample {
    pub fn labeled<I, S>(features: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Sample {
            features: features.into_iter().map(Into::into).collect(),
            label: Some(label.into()),
        }
    }

    pub fn unlabeled<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Sample {
            features: features.into_iter().map(Into::into).collect(),
            label: None,
        }
    }

    pub fn arity(&self) -> usize {
        self.features.len()
    }
}
