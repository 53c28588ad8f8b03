use crate::Tensor;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer};
use nabla_core::array::NDArray;

// Only the value and the flag survive; a deserialized tensor is always a leaf.
#[derive(Serialize, Deserialize)]
struct SerializedTensor {
    value: NDArray,
    requires_grad: bool,
}

impl Serialize for Tensor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        SerializedTensor {
            value: self.value().clone(),
            requires_grad: self.requires_grad(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tensor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serialized = SerializedTensor::deserialize(deserializer)?;
        Ok(Tensor::from_parts(serialized.value, serialized.requires_grad, None))
    }
}
