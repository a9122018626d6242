//! The Allegra native script type.
//!
//! Allegra keeps the four Shelley multisig variants and adds two time locks:
//! `After(slot)` and `Before(slot)`. The multisig variants are not copied
//! here; they live in `MultisigScript<NativeScript>` so their encoding,
//! decoding and evaluation stay in one place while their children may be any
//! of the six kinds.

use std::fmt;

use allegra_contracts::hash::{PubKeyHash, ScriptHash};
use allegra_core::traits::{Evaluate, NativeContext, Witness};
use allegra_multisig::{native_script_hash, MultisigScript, ShelleyScript};

/// The six native script kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    Sig,
    All,
    Any,
    AtLeast,
    After,
    Before,
}

impl ScriptKind {
    /// The JSON `"type"` name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sig => "sig",
            Self::All => "all",
            Self::Any => "any",
            Self::AtLeast => "atLeast",
            Self::After => "after",
            Self::Before => "before",
        }
    }

    /// True for the four kinds inherited from the Shelley era.
    pub fn is_shelley(&self) -> bool {
        !matches!(self, Self::After | Self::Before)
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable native script tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeScript {
    /// One of the Shelley variants, with native script children.
    Multisig(MultisigScript<NativeScript>),
    /// Satisfied when the transaction cannot be valid before `slot`.
    After(u64),
    /// Satisfied when the transaction cannot be valid from `slot` on.
    Before(u64),
}

impl NativeScript {
    pub fn sig(hash: PubKeyHash) -> Self {
        Self::Multisig(MultisigScript::sig(hash))
    }

    pub fn all(scripts: Vec<NativeScript>) -> Self {
        Self::Multisig(MultisigScript::all(scripts))
    }

    pub fn any(scripts: Vec<NativeScript>) -> Self {
        Self::Multisig(MultisigScript::any(scripts))
    }

    /// No check is made that `required` is reachable with `scripts.len()`.
    pub fn at_least(required: u64, scripts: Vec<NativeScript>) -> Self {
        Self::Multisig(MultisigScript::at_least(required, scripts))
    }

    pub fn after(slot: u64) -> Self {
        Self::After(slot)
    }

    pub fn before(slot: u64) -> Self {
        Self::Before(slot)
    }

    pub fn kind(&self) -> ScriptKind {
        match self {
            Self::Multisig(MultisigScript::Sig(_)) => ScriptKind::Sig,
            Self::Multisig(MultisigScript::All(_)) => ScriptKind::All,
            Self::Multisig(MultisigScript::Any(_)) => ScriptKind::Any,
            Self::Multisig(MultisigScript::AtLeast { .. }) => ScriptKind::AtLeast,
            Self::After(_) => ScriptKind::After,
            Self::Before(_) => ScriptKind::Before,
        }
    }

    pub fn is_sig(&self) -> bool {
        self.kind() == ScriptKind::Sig
    }

    pub fn is_all(&self) -> bool {
        self.kind() == ScriptKind::All
    }

    pub fn is_any(&self) -> bool {
        self.kind() == ScriptKind::Any
    }

    pub fn is_at_least(&self) -> bool {
        self.kind() == ScriptKind::AtLeast
    }

    /// True for any of the four multisig kinds.
    pub fn is_shelley(&self) -> bool {
        matches!(self, Self::Multisig(_))
    }

    pub fn is_after(&self) -> bool {
        matches!(self, Self::After(_))
    }

    pub fn is_before(&self) -> bool {
        matches!(self, Self::Before(_))
    }

    /// Direct children in declaration order. Empty for leaves.
    pub fn children(&self) -> &[NativeScript] {
        match self {
            Self::Multisig(script) => script.children(),
            Self::After(_) | Self::Before(_) => &[],
        }
    }

    /// Evaluate this script against `ctx`.
    ///
    /// Multisig variants are evaluated by `MultisigScript`, which recurses
    /// back into this method for each child. Time locks ask the context.
    pub fn eval<X: NativeContext + ?Sized>(&self, ctx: &X) -> bool {
        match self {
            Self::Multisig(script) => script.eval(ctx),
            Self::After(slot) => ctx.is_after(*slot),
            Self::Before(slot) => ctx.is_before(*slot),
        }
    }

    /// BLAKE2b-224 of `0x00 ++ to_cbor()`.
    ///
    /// The prefix is added unconditionally, independent of whether the script
    /// was decoded from bytes that carried an era marker.
    pub fn hash(&self) -> ScriptHash {
        native_script_hash(&self.to_cbor())
    }
}

impl<X: NativeContext + ?Sized> Evaluate<X> for NativeScript {
    fn eval(&self, ctx: &X) -> bool {
        NativeScript::eval(self, ctx)
    }
}

impl<X: NativeContext + ?Sized> Witness<X> for NativeScript {
    fn script_hash(&self) -> ScriptHash {
        self.hash()
    }
}

impl From<MultisigScript<NativeScript>> for NativeScript {
    fn from(script: MultisigScript<NativeScript>) -> Self {
        Self::Multisig(script)
    }
}

/// Every Shelley script is a valid Allegra script with the same encoding.
impl From<ShelleyScript> for NativeScript {
    fn from(script: ShelleyScript) -> Self {
        let lift = |children: Vec<ShelleyScript>| -> Vec<NativeScript> {
            children.into_iter().map(Self::from).collect()
        };
        Self::Multisig(match script.0 {
            MultisigScript::Sig(hash) => MultisigScript::Sig(hash),
            MultisigScript::All(children) => MultisigScript::All(lift(children)),
            MultisigScript::Any(children) => MultisigScript::Any(lift(children)),
            MultisigScript::AtLeast { required, scripts } => MultisigScript::AtLeast {
                required,
                scripts: lift(scripts),
            },
        })
    }
}
