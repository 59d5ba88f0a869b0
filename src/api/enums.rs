//! Canonical enumerations
//!
//! Each enum carries an `Unset` variant that serializes as the empty string.
//! It is the zero value of the field: an external request may send `""`
//! explicitly and it must survive a round trip as such.

use std::str::FromStr;

use super::error::ConversionError;

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Default,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::schemars::JsonSchema,
        )]
        pub enum $name {
            #[default]
            #[serde(rename = "")]
            Unset,
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    Self::Unset => "",
                    $(Self::$variant => $wire,)+
                }
            }

            pub fn is_unset(&self) -> bool {
                matches!(self, Self::Unset)
            }
        }

        impl FromStr for $name {
            type Err = ConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    "" => Ok(Self::Unset),
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ConversionError::unknown_value("string", other, stringify!($name))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Whether the API server is reachable from the internet
    Visibility {
        Public => "Public",
        Private => "Private",
    }
);

wire_enum!(NetworkType {
    OvnKubernetes => "OVNKubernetes",
    Other => "Other",
});

wire_enum!(OutboundType {
    LoadBalancer => "LoadBalancer",
});

wire_enum!(DiskStorageAccountType {
    PremiumLrs => "Premium_LRS",
    StandardSsdLrs => "StandardSSD_LRS",
    StandardLrs => "Standard_LRS",
});

wire_enum!(
    /// Kubernetes taint effect
    Effect {
        NoSchedule => "NoSchedule",
        PreferNoSchedule => "PreferNoSchedule",
        NoExecute => "NoExecute",
    }
);

wire_enum!(EtcdDataEncryptionKeyManagementModeType {
    CustomerManaged => "CustomerManaged",
    PlatformManaged => "PlatformManaged",
});

wire_enum!(CustomerManagedEncryptionType {
    Kms => "KMS",
});

wire_enum!(ClusterImageRegistryProfileState {
    Enabled => "Enabled",
    Disabled => "Disabled",
});

wire_enum!(UsernameClaimPrefixPolicy {
    Prefix => "Prefix",
    NoPrefix => "NoPrefix",
    None => "None",
});

wire_enum!(ExternalAuthClientType {
    Confidential => "Confidential",
    Public => "Public",
});

wire_enum!(TokenValidationRuleType {
    RequiredClaim => "RequiredClaim",
});

wire_enum!(ExternalAuthConditionType {
    Available => "Available",
    Degraded => "Degraded",
    Progressing => "Progressing",
});

wire_enum!(ConditionStatusType {
    True => "True",
    False => "False",
    Unknown => "Unknown",
});

wire_enum!(CreatedByType {
    User => "User",
    Application => "Application",
    ManagedIdentity => "ManagedIdentity",
    Key => "Key",
});

wire_enum!(ManagedServiceIdentityType {
    None => "None",
    SystemAssigned => "SystemAssigned",
    UserAssigned => "UserAssigned",
    SystemAssignedUserAssigned => "SystemAssigned,UserAssigned",
});

wire_enum!(
    /// Lifecycle state reported for every resource
    ProvisioningState {
        Succeeded => "Succeeded",
        Failed => "Failed",
        Canceled => "Canceled",
        Accepted => "Accepted",
        Deleting => "Deleting",
        Provisioning => "Provisioning",
        Updating => "Updating",
    }
);

#[cfg(test)]
#[path = "enums_test.rs"]
mod tests;
