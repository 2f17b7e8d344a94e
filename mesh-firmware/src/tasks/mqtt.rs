// MQTT Task - Transportiert Mesh-Frames über das Gruppen-Topic
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Timer, with_timeout};

use mesh_core::frame::MAX_FRAME_LEN;
use mesh_core::{MeshFrame, NodeRole};
use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use crate::config::*;
use crate::tasks::wifi::wait_for_network;
use crate::{EventSender, FirmwareEvent, OutboundReceiver};

type Client<'a, 's> = MqttClient<'a, TcpSocket<'s>, 5, CountingRng>;

/// MQTT Task - Mesh-Transport je nach Rolle
///
/// - **Client:** published jeden Frame aus dem Outbound-Channel auf `MQTT_TOPIC`
/// - **Server:** abonniert `MQTT_TOPIC` und leitet dekodierte Frames an den Node Task
///
/// Bei Fehlern wird nach `MQTT_RECONNECT_DELAY_SECS` neu verbunden.
#[embassy_executor::task]
pub async fn mqtt_task(
    stack: &'static Stack<'static>,
    role: NodeRole,
    outbound: OutboundReceiver,
    events: EventSender,
) {
    info!("MQTT: Task started, waiting for network...");
    wait_for_network(stack).await;
    info!("MQTT: Network ready");

    loop {
        match run_session(stack, role, &outbound, &events).await {
            Ok(()) => warn!("MQTT: Connection closed normally"),
            Err(e) => error!("MQTT: Error: {}", e),
        }
        info!("MQTT: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

/// Eine Broker-Session: DNS, TCP, CONNECT, dann Publish- oder Receive-Loop
async fn run_session(
    stack: &'static Stack<'static>,
    role: NodeRole,
    outbound: &OutboundReceiver,
    events: &EventSender,
) -> Result<(), MqttError> {
    info!("MQTT: Resolving '{}'...", MQTT_BROKER);
    let broker_ip = resolve_hostname(stack, MQTT_BROKER).await?;
    info!("MQTT: Resolved to {}", Debug2Format(&broker_ip));

    let mut rx_buffer = [0u8; TCP_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_BUFFER_SIZE];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(u64::from(MQTT_KEEP_ALIVE_SECS) * 2)));
    socket
        .connect((broker_ip, MQTT_PORT))
        .await
        .map_err(|_| MqttError::ConnectionFailed)?;
    info!("MQTT: TCP connected");

    let mut config = ClientConfig::<5, _>::new(MqttVersion::MQTTv5, CountingRng(20000));
    config.client_id = EncodedString {
        string: MQTT_CLIENT_ID,
        len: MQTT_CLIENT_ID.len() as u16,
    };
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;

    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    client
        .connect_to_broker()
        .await
        .map_err(|_| MqttError::ProtocolError)?;
    info!("MQTT: Connected to broker as {}", role);

    match role {
        NodeRole::Client => publish_frames(&mut client, outbound).await,
        NodeRole::Server => receive_frames(&mut client, events).await,
    }
}

/// Client: Frames aus dem Outbound-Channel publishen, dazwischen Keep-Alive
async fn publish_frames(
    client: &mut Client<'_, '_>,
    outbound: &OutboundReceiver,
) -> Result<(), MqttError> {
    let ping_interval = Duration::from_secs(u64::from(MQTT_KEEP_ALIVE_SECS) / 2);
    let mut buf = [0u8; MAX_FRAME_LEN];

    loop {
        let Ok(frame) = with_timeout(ping_interval, outbound.receive()).await else {
            client.send_ping().await.map_err(|_| MqttError::PingFailed)?;
            continue;
        };

        let len = frame.encode(&mut buf).map_err(|_| MqttError::FrameInvalid)?;
        client
            .send_message(MQTT_TOPIC, &buf[..len], QualityOfService::QoS0, false)
            .await
            .map_err(|_| MqttError::PublishFailed)?;
        info!("MQTT: Published {}", frame);
    }
}

/// Server: Gruppen-Topic abonnieren und Frames an den Node Task weiterleiten
async fn receive_frames(
    client: &mut Client<'_, '_>,
    events: &EventSender,
) -> Result<(), MqttError> {
    client
        .subscribe_to_topic(MQTT_TOPIC)
        .await
        .map_err(|_| MqttError::SubscribeFailed)?;
    info!("MQTT: Subscribed to '{}'", MQTT_TOPIC);

    let ping_interval = Duration::from_secs(u64::from(MQTT_KEEP_ALIVE_SECS) / 2);

    loop {
        let decoded = match with_timeout(ping_interval, client.receive_message()).await {
            Ok(Ok((_topic, payload))) => MeshFrame::decode(payload),
            Ok(Err(_)) => return Err(MqttError::ReceiveFailed),
            Err(_) => {
                client.send_ping().await.map_err(|_| MqttError::PingFailed)?;
                continue;
            }
        };

        match decoded {
            Ok(frame) => events.send(FirmwareEvent::Message(frame)).await,
            Err(e) => warn!("MQTT: Dropping malformed frame: {}", e),
        }
    }
}

/// Löst Hostname zu IPv4-Adresse auf
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, MqttError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => addrs
            .iter()
            .find_map(|addr| match addr {
                IpAddress::Ipv4(ipv4) => Some(*ipv4),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .ok_or(MqttError::DnsResolutionFailed),
        Ok(Err(_)) => Err(MqttError::DnsResolutionFailed),
        Err(_) => Err(MqttError::DnsTimeout),
    }
}

/// MQTT Fehler-Typen
#[derive(Debug)]
enum MqttError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
    SubscribeFailed,
    PublishFailed,
    ReceiveFailed,
    PingFailed,
    FrameInvalid,
}

impl defmt::Format for MqttError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MqttError::DnsResolutionFailed => defmt::write!(fmt, "DNS failed"),
            MqttError::DnsTimeout => defmt::write!(fmt, "DNS timeout"),
            MqttError::ConnectionFailed => defmt::write!(fmt, "Connection failed"),
            MqttError::ProtocolError => defmt::write!(fmt, "Protocol error"),
            MqttError::SubscribeFailed => defmt::write!(fmt, "Subscribe failed"),
            MqttError::PublishFailed => defmt::write!(fmt, "Publish failed"),
            MqttError::ReceiveFailed => defmt::write!(fmt, "Receive failed"),
            MqttError::PingFailed => defmt::write!(fmt, "Ping failed"),
            MqttError::FrameInvalid => defmt::write!(fmt, "Frame invalid"),
        }
    }
}
