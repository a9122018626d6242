//! Shelley-era scripts: multisig all the way down.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use allegra_contracts::{
    error::ScriptResult,
    hash::{PubKeyHash, ScriptHash},
};
use allegra_core::traits::{Evaluate, SignatureContext, Witness};

use crate::codec::{self, strip_era_marker};
use crate::hash::native_script_hash;
use crate::script::MultisigScript;

/// A multisig script whose children are themselves Shelley scripts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShelleyScript(pub MultisigScript<ShelleyScript>);

impl ShelleyScript {
    pub fn sig(hash: PubKeyHash) -> Self {
        Self(MultisigScript::sig(hash))
    }

    pub fn all(scripts: Vec<ShelleyScript>) -> Self {
        Self(MultisigScript::all(scripts))
    }

    pub fn any(scripts: Vec<ShelleyScript>) -> Self {
        Self(MultisigScript::any(scripts))
    }

    pub fn at_least(required: u64, scripts: Vec<ShelleyScript>) -> Self {
        Self(MultisigScript::at_least(required, scripts))
    }

    /// Decode from CBOR, tolerating one leading era marker byte.
    pub fn from_cbor(bytes: &[u8]) -> ScriptResult<Self> {
        let script: Self = codec::decode(strip_era_marker(bytes))?;
        debug!(kind = script.0.type_name(), "decoded shelley script");
        Ok(script)
    }

    pub fn to_cbor(&self) -> Vec<u8> {
        codec::encode(self)
    }

    pub fn from_json(value: &Value) -> ScriptResult<Self> {
        MultisigScript::from_json_with(value, Self::from_json).map(Self)
    }

    pub fn to_json(&self) -> Value {
        self.0.to_json_with(Self::to_json)
    }

    pub fn hash(&self) -> ScriptHash {
        native_script_hash(&self.to_cbor())
    }
}

impl<X: SignatureContext + ?Sized> Evaluate<X> for ShelleyScript {
    fn eval(&self, ctx: &X) -> bool {
        self.0.eval(ctx)
    }
}

impl<X: SignatureContext + ?Sized> Witness<X> for ShelleyScript {
    fn script_hash(&self) -> ScriptHash {
        self.hash()
    }
}
