//! The closed component catalog.
//!
//! Every supported type discriminator is one row in the `component_catalog!`
//! table below. The macro generates the [`ComponentKind`] sum type and its
//! accessors, so a new component kind is wired up by adding exactly one row —
//! forgetting a match arm is impossible because every lookup goes through the
//! generated exhaustive matches.

/// What element family a component produces in the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Entry event of a process; exempt from the incoming-edge requirement.
    StartEvent,
    /// Exit event of a process; exempt from the outgoing-edge requirement.
    EndEvent,
    /// In-flow event (timers and similar waits).
    IntermediateEvent,
    /// Routing element with one outgoing reference per declared branch.
    Gateway(GatewayKind),
    /// Everything else: a generic call activity.
    Activity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayKind {
    Exclusive,
    Parallel,
    Sequential,
    Join,
}

macro_rules! component_catalog {
    ( $( ($variant:ident, $disc:literal, $role:expr, $activity:literal, $version:literal, $cname:literal) ),* $(,)? ) => {
        /// One variant per supported component type discriminator.
        ///
        /// The set is closed and versioned: a discriminator outside this
        /// catalog is a fatal error at generation time, never a generic
        /// fallback element.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ComponentKind {
            $( $variant, )*
        }

        impl ComponentKind {
            /// All catalog entries, in declaration order.
            pub const ALL: &'static [ComponentKind] = &[ $( ComponentKind::$variant, )* ];

            /// Look up a type discriminator. `None` means the type is not in
            /// the catalog and the component must be rejected.
            pub fn from_discriminator(discriminator: &str) -> Option<Self> {
                match discriminator {
                    $( $disc => Some(Self::$variant), )*
                    _ => None,
                }
            }

            pub fn discriminator(self) -> &'static str {
                match self { $( Self::$variant => $disc, )* }
            }

            pub fn role(self) -> Role {
                match self { $( Self::$variant => $role, )* }
            }

            /// The dialect's activity-type tag for this kind.
            pub fn activity_type(self) -> &'static str {
                match self { $( Self::$variant => $activity, )* }
            }

            /// Default component version, used when the configuration does
            /// not supply one explicitly.
            pub fn default_version(self) -> &'static str {
                match self { $( Self::$variant => $version, )* }
            }

            /// Variant name used in the derived variant-URI.
            pub fn variant_name(self) -> &'static str {
                match self { $( Self::$variant => $cname, )* }
            }
        }
    };
}

component_catalog! {
    // Events
    (MessageStartEvent, "messageStartEvent", Role::StartEvent, "StartEvent", "1.0", "MessageStartEvent"),
    (TimerStartEvent, "timerStartEvent", Role::StartEvent, "Timer", "1.2", "TimerStartEvent"),
    (ErrorStartEvent, "errorStartEvent", Role::StartEvent, "ErrorStartEvent", "1.0", "ErrorStartEvent"),
    (MessageEndEvent, "messageEndEvent", Role::EndEvent, "EndEvent", "1.1", "MessageEndEvent"),
    (ErrorEndEvent, "errorEndEvent", Role::EndEvent, "ErrorEndEvent", "1.1", "ErrorEndEvent"),
    (EscalationEndEvent, "escalationEndEvent", Role::EndEvent, "EscalationEndEvent", "1.1", "EscalationEndEvent"),
    (TerminateEndEvent, "terminateEndEvent", Role::EndEvent, "TerminateEndEvent", "1.1", "TerminateEndEvent"),
    (IntermediateTimerEvent, "intermediateTimerEvent", Role::IntermediateEvent, "IntermediateTimer", "1.2", "IntermediateTimerEvent"),

    // Gateways
    (Router, "router", Role::Gateway(GatewayKind::Exclusive), "ExclusiveGateway", "1.4", "ExclusiveGateway"),
    (Multicast, "multicast", Role::Gateway(GatewayKind::Parallel), "ParallelGateway", "1.1", "ParallelMulticast"),
    (SequentialMulticast, "sequentialMulticast", Role::Gateway(GatewayKind::Sequential), "SequentialMulticast", "1.1", "SequentialMulticast"),
    (Join, "join", Role::Gateway(GatewayKind::Join), "Join", "1.1", "Join"),

    // Scripting
    (GroovyScript, "groovyScript", Role::Activity, "Script", "1.1", "GroovyScript"),
    (JavascriptScript, "javascriptScript", Role::Activity, "Script", "1.1", "JSScript"),

    // Message shaping
    (ContentModifier, "contentModifier", Role::Activity, "Enricher", "1.6", "ContentModifier"),
    (ContentEnricher, "contentEnricher", Role::Activity, "Enricher", "1.2", "ContentEnricher"),
    (PollEnrich, "pollEnrich", Role::Activity, "PollEnrich", "1.0", "PollEnrich"),
    (XmlModifier, "xmlModifier", Role::Activity, "XmlModifier", "1.0", "XmlModifier"),
    (ContentFilter, "contentFilter", Role::Activity, "Filter", "1.2", "ContentFilter"),
    (MessageFilter, "messageFilter", Role::Activity, "Filter", "1.1", "MessageFilter"),
    (RemoveHeaders, "removeHeaders", Role::Activity, "RemoveHeaders", "1.0", "RemoveHeaders"),
    (RemoveProperties, "removeProperties", Role::Activity, "RemoveProperties", "1.0", "RemoveProperties"),

    // Mappings
    (MessageMapping, "messageMapping", Role::Activity, "Mapping", "1.3", "MessageMapping"),
    (XsltMapping, "xsltMapping", Role::Activity, "Mapping", "1.2", "XSLTMapping"),
    (OperationMapping, "operationMapping", Role::Activity, "Mapping", "1.1", "OperationMapping"),

    // Calls
    (RequestReply, "requestReply", Role::Activity, "ExternalCall", "1.0", "RequestReply"),
    (Send, "send", Role::Activity, "ExternalCall", "1.0", "Send"),
    (ProcessCall, "processCall", Role::Activity, "ProcessCallElement", "1.1", "ProcessCall"),
    (LoopingProcessCall, "loopingProcessCall", Role::Activity, "LoopElement", "1.2", "LoopingProcessCall"),
    (IdempotentProcessCall, "idempotentProcessCall", Role::Activity, "IdempotentProcessCall", "1.0", "IdempotentProcessCall"),

    // Splitting and aggregation
    (GeneralSplitter, "generalSplitter", Role::Activity, "Splitter", "1.5", "GeneralSplitter"),
    (IteratingSplitter, "iteratingSplitter", Role::Activity, "Splitter", "1.5", "IterativeSplitter"),
    (EdiSplitter, "ediSplitter", Role::Activity, "Splitter", "1.4", "EDISplitter"),
    (IdocSplitter, "idocSplitter", Role::Activity, "Splitter", "1.3", "IDocSplitter"),
    (Pkcs7Splitter, "pkcs7Splitter", Role::Activity, "Splitter", "1.2", "PKCS7Splitter"),
    (Aggregator, "aggregator", Role::Activity, "Aggregator", "1.1", "Aggregator"),
    (Gather, "gather", Role::Activity, "Gather", "1.1", "Gather"),

    // Format converters
    (XmlToJsonConverter, "xmlToJsonConverter", Role::Activity, "XmlToJsonConverter", "1.1", "XmlToJsonConverter"),
    (JsonToXmlConverter, "jsonToXmlConverter", Role::Activity, "JsonToXmlConverter", "1.1", "JsonToXmlConverter"),
    (CsvToXmlConverter, "csvToXmlConverter", Role::Activity, "CsvToXmlConverter", "1.0", "CsvToXmlConverter"),
    (XmlToCsvConverter, "xmlToCsvConverter", Role::Activity, "XmlToCsvConverter", "1.0", "XmlToCsvConverter"),
    (JsonToCsvConverter, "jsonToCsvConverter", Role::Activity, "JsonToCsvConverter", "1.0", "JsonToCsvConverter"),
    (CsvToJsonConverter, "csvToJsonConverter", Role::Activity, "CsvToJsonConverter", "1.0", "CsvToJsonConverter"),
    (EdiToXmlConverter, "ediToXmlConverter", Role::Activity, "EDItoXMLConverter", "1.0", "EDItoXMLConverter"),
    (XmlToEdiConverter, "xmlToEdiConverter", Role::Activity, "XMLtoEDIConverter", "1.0", "XMLtoEDIConverter"),
    (FlatToXmlConverter, "flatToXmlConverter", Role::Activity, "FlatToXMLConverter", "1.0", "FlatToXMLConverter"),
    (XmlToFlatConverter, "xmlToFlatConverter", Role::Activity, "XMLtoFlatConverter", "1.0", "XMLtoFlatConverter"),

    // Encoding
    (Base64Encoder, "base64Encoder", Role::Activity, "Encoder", "1.1", "Base64Encoder"),
    (Base64Decoder, "base64Decoder", Role::Activity, "Decoder", "1.1", "Base64Decoder"),
    (ZipCompressor, "zipCompressor", Role::Activity, "Encoder", "1.1", "ZipCompression"),
    (ZipDecompressor, "zipDecompressor", Role::Activity, "Decoder", "1.1", "ZipDecompression"),
    (GzipCompressor, "gzipCompressor", Role::Activity, "Encoder", "1.1", "GzipCompression"),
    (GzipDecompressor, "gzipDecompressor", Role::Activity, "Decoder", "1.1", "GzipDecompression"),
    (TarGzipCompressor, "tarGzipCompressor", Role::Activity, "Encoder", "1.0", "TarGzipCompression"),
    (TarGzipDecompressor, "tarGzipDecompressor", Role::Activity, "Decoder", "1.0", "TarGzipDecompression"),
    (MimeMultipartEncoder, "mimeMultipartEncoder", Role::Activity, "Encoder", "1.1", "MimeMultipartEncoder"),
    (MimeMultipartDecoder, "mimeMultipartDecoder", Role::Activity, "Decoder", "1.1", "MimeMultipartDecoder"),

    // Security
    (PgpEncryptor, "pgpEncryptor", Role::Activity, "Encryptor", "1.2", "PGPEncryptor"),
    (PgpDecryptor, "pgpDecryptor", Role::Activity, "Decryptor", "1.2", "PGPDecryptor"),
    (Pkcs7Encryptor, "pkcs7Encryptor", Role::Activity, "Encryptor", "1.1", "PKCS7Encryptor"),
    (Pkcs7Decryptor, "pkcs7Decryptor", Role::Activity, "Decryptor", "1.1", "PKCS7Decryptor"),
    (Pkcs7Signer, "pkcs7Signer", Role::Activity, "Signer", "1.1", "PKCS7Signer"),
    (Pkcs7Verifier, "pkcs7Verifier", Role::Activity, "Verifier", "1.1", "PKCS7Verifier"),
    (XmlSigner, "xmlSigner", Role::Activity, "Signer", "1.1", "XMLSigner"),
    (XmlVerifier, "xmlVerifier", Role::Activity, "Verifier", "1.1", "XMLVerifier"),
    (XmlEncryptor, "xmlEncryptor", Role::Activity, "Encryptor", "1.0", "XMLEncryptor"),
    (XmlDecryptor, "xmlDecryptor", Role::Activity, "Decryptor", "1.0", "XMLDecryptor"),
    (SimpleSigner, "simpleSigner", Role::Activity, "Signer", "1.0", "SimpleSigner"),
    (MessageDigest, "messageDigest", Role::Activity, "MessageDigest", "1.0", "MessageDigest"),

    // Storage and state
    (DataStoreWrite, "dataStoreWrite", Role::Activity, "DBstorage", "1.3", "DataStoreWrite"),
    (DataStoreGet, "dataStoreGet", Role::Activity, "DBstorage", "1.3", "DataStoreGet"),
    (DataStoreSelect, "dataStoreSelect", Role::Activity, "DBstorage", "1.3", "DataStoreSelect"),
    (DataStoreDelete, "dataStoreDelete", Role::Activity, "DBstorage", "1.3", "DataStoreDelete"),
    (PersistMessage, "persistMessage", Role::Activity, "Persist", "1.1", "Persist"),
    (WriteVariables, "writeVariables", Role::Activity, "WriteVariables", "1.1", "WriteVariables"),

    // Validation
    (XmlValidator, "xmlValidator", Role::Activity, "XmlValidator", "1.1", "XmlValidator"),
    (EdiValidator, "ediValidator", Role::Activity, "EDIValidator", "1.0", "EDIValidator"),
    (JsonValidator, "jsonValidator", Role::Activity, "JsonValidator", "1.0", "JsonValidator"),

    // Identity and lookup
    (IdMapper, "idMapper", Role::Activity, "IDMapper", "1.0", "IDMapper"),
    (ValueMapping, "valueMapping", Role::Activity, "ValueMapping", "1.1", "ValueMapping"),
    (EdiExtractor, "ediExtractor", Role::Activity, "EDIExtractor", "1.0", "EDIExtractor"),
    (NumberRange, "numberRange", Role::Activity, "NumberRange", "1.0", "NumberRange"),

    // Flow control
    (WireTap, "wireTap", Role::Activity, "WireTap", "1.0", "WireTap"),
    (Throttle, "throttle", Role::Activity, "Throttle", "1.0", "Throttle"),
    (Sort, "sort", Role::Activity, "Sort", "1.0", "Sort"),
    (DuplicateCheck, "duplicateCheck", Role::Activity, "DuplicateCheck", "1.0", "DuplicateCheck"),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminator_round_trip() {
        for kind in ComponentKind::ALL {
            assert_eq!(
                ComponentKind::from_discriminator(kind.discriminator()),
                Some(*kind)
            );
        }
    }

    #[test]
    fn discriminators_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in ComponentKind::ALL {
            assert!(
                seen.insert(kind.discriminator()),
                "duplicate discriminator {}",
                kind.discriminator()
            );
        }
    }

    #[test]
    fn unknown_discriminator_is_rejected() {
        assert_eq!(ComponentKind::from_discriminator("teleporter"), None);
    }

    #[test]
    fn event_roles_are_marked() {
        assert_eq!(
            ComponentKind::MessageStartEvent.role(),
            Role::StartEvent
        );
        assert_eq!(ComponentKind::TerminateEndEvent.role(), Role::EndEvent);
        assert_eq!(
            ComponentKind::Router.role(),
            Role::Gateway(GatewayKind::Exclusive)
        );
        assert_eq!(ComponentKind::GroovyScript.role(), Role::Activity);
    }
}
