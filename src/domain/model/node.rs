use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

use super::KeyPath;

/// One step of a graph: a module reference, the ordered keys bound to the
/// module's positional arguments, and optional labels for its return values.
///
/// `M` is the module reference. A pure graph uses `String` names; a graph
/// specification may carry live instances instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<M = String> {
    pub module: M,
    pub inputs: Vec<KeyPath>,
    pub outputs: Option<Vec<String>>,
}

impl<M> Node<M> {
    pub fn new<I, K>(module: impl Into<M>, inputs: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyPath>,
    {
        Self {
            module: module.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: None,
        }
    }

    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = Some(outputs.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the module reference, keeping the bindings.
    pub fn map_module<N>(self, f: impl FnOnce(M) -> N) -> Node<N> {
        Node {
            module: f(self.module),
            inputs: self.inputs,
            outputs: self.outputs,
        }
    }
}

/// Serialized in list form: `[module, [inputs...], [outputs...]]`, the
/// outputs element omitted when absent.
impl<M: Serialize> Serialize for Node<M> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.outputs.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.module)?;
        seq.serialize_element(&self.inputs)?;
        if let Some(outputs) = &self.outputs {
            seq.serialize_element(outputs)?;
        }
        seq.end()
    }
}

/// Accepts the list form or a map form `{module, inputs, outputs?}`.
impl<'de, M: Deserialize<'de>> Deserialize<'de> for Node<M> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor<M>(PhantomData<M>);

        impl<'de, M: Deserialize<'de>> Visitor<'de> for NodeVisitor<M> {
            type Value = Node<M>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    "node as [module, [inputs...], [outputs...]] or {module, inputs, outputs}",
                )
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let module: M = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let inputs: Vec<KeyPath> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let outputs: Option<Option<Vec<String>>> = seq.next_element()?;
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(4, &self));
                }
                Ok(Node {
                    module,
                    inputs,
                    outputs: outputs.flatten(),
                })
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut module: Option<M> = None;
                let mut inputs: Option<Vec<KeyPath>> = None;
                let mut outputs: Option<Vec<String>> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "module" => module = Some(map.next_value()?),
                        "inputs" => inputs = Some(map.next_value()?),
                        "outputs" => outputs = map.next_value()?,
                        other => {
                            return Err(de::Error::unknown_field(
                                other,
                                &["module", "inputs", "outputs"],
                            ))
                        }
                    }
                }
                Ok(Node {
                    module: module.ok_or_else(|| de::Error::missing_field("module"))?,
                    inputs: inputs.unwrap_or_default(),
                    outputs,
                })
            }
        }

        deserializer.deserialize_any(NodeVisitor(PhantomData))
    }
}
