use core::marker::PhantomData;

use atat::AtatCmd;
use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};

use crate::client::{self, Client};
use crate::command::general::{GetCcid, GetImei, GetSignalQuality};
use crate::command::mqtt::types::{Qos, SubscriptionAction};
use crate::command::mqtt::{Connect, Disconnect, Publish, Subscribe};
use crate::command::psn::types::{GprsAttachedState, PdpContextStatus};
use crate::command::psn::{SetGprsAttached, SetPdpContextDefinition, SetPdpContextState};
use crate::command::sms::types::{DeleteFlag, MessageFormat, MessageStatus};
use crate::command::sms::{
    DeleteMessage, ListMessages, ReadMessage, SendMessage, SetMessageFormat,
};
use crate::command::AT;
use crate::config::{Apn, Broker, ModemConfig};
use crate::error::Error;
use crate::urc::EventHandler;

/// Ends the text of an outgoing message.
const CTRL_Z: u8 = 0x1a;

/// How far the modem has been brought up, as far as this driver knows.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationState {
    Unknown = 0,
    /// Answered a command
    Alive = 1,
    GprsAttached = 2,
    DataEstablished = 3,
    BrokerConnected = 4,
}

/// A9G driver. Every operation sends one command and completes on its `OK`;
/// information responses and unsolicited notifications go to the handler.
pub struct Modem<'a, IO, H, C: ModemConfig<'a>> {
    client: Client<IO, H>,
    config: C,
    state: OperationState,
    _lifetime: PhantomData<&'a ()>,
}

impl<'a, IO, H, C> Modem<'a, IO, H, C>
where
    IO: Read + Write + ReadReady,
    H: EventHandler,
    C: ModemConfig<'a>,
{
    pub fn new(io: IO, handler: H, config: C) -> Self {
        Self {
            client: Client::new(io, handler),
            config,
            state: OperationState::Unknown,
            _lifetime: PhantomData,
        }
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn client(&mut self) -> &mut Client<IO, H> {
        &mut self.client
    }

    pub fn handler_mut(&mut self) -> &mut H {
        self.client.handler_mut()
    }

    pub fn release(self) -> (IO, H) {
        self.client.release()
    }

    fn raise(&mut self, state: OperationState) {
        if self.state < state {
            debug!("Operation state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn lower(&mut self, state: OperationState) {
        if self.state > state {
            debug!("Operation state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    pub async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<(), Error> {
        self.client.send(cmd).await?;
        self.raise(OperationState::Alive);
        Ok(())
    }

    /// Send a raw command line, including its `\r\n`.
    pub async fn execute(&mut self, command: &[u8]) -> Result<(), Error> {
        self.client.execute(command, C::COMMAND_TIMEOUT).await?;
        self.raise(OperationState::Alive);
        Ok(())
    }

    /// Dispatch buffered notifications without sending anything.
    pub async fn poll(&mut self) -> Result<usize, Error> {
        self.client.poll().await
    }

    pub async fn is_alive(&mut self) -> bool {
        self.send(&AT).await.is_ok()
    }

    /// Send `AT` and wait for the module to report `READY`.
    pub async fn wait_for_ready(&mut self) -> Result<(), Error> {
        self.client.write(b"AT\r\n").await?;
        self.client.wait_for(b"READY", C::READY_TIMEOUT).await?;
        info!("Module ready");
        self.raise(OperationState::Alive);
        Ok(())
    }

    pub async fn attach_gprs(&mut self) -> Result<(), Error> {
        self.send(&SetGprsAttached {
            state: GprsAttachedState::Attached,
        })
        .await?;
        info!("Attached to GPRS");
        self.raise(OperationState::GprsAttached);
        Ok(())
    }

    pub async fn detach_gprs(&mut self) -> Result<(), Error> {
        self.send(&SetGprsAttached {
            state: GprsAttachedState::Detached,
        })
        .await?;
        info!("Detached from GPRS");
        self.lower(OperationState::Alive);
        Ok(())
    }

    /// Define the PDP context with `apn`. [`Apn::None`] leaves the context
    /// as it is.
    pub async fn set_apn(&mut self, apn: &Apn<'_>) -> Result<(), Error> {
        match *apn {
            Apn::None => {
                debug!("No APN configured");
                Ok(())
            }
            Apn::Given { name, pdp_type } => {
                self.send(&SetPdpContextDefinition {
                    cid: C::CONTEXT_ID,
                    pdp_type,
                    apn: name,
                })
                .await?;
                info!("APN set");
                Ok(())
            }
        }
    }

    pub async fn activate_pdp(&mut self) -> Result<(), Error> {
        self.send(&SetPdpContextState {
            status: PdpContextStatus::Activated,
            cid: C::CONTEXT_ID,
        })
        .await?;
        info!("PDP context activated");
        self.raise(OperationState::DataEstablished);
        Ok(())
    }

    pub async fn deactivate_pdp(&mut self) -> Result<(), Error> {
        self.send(&SetPdpContextState {
            status: PdpContextStatus::Deactivated,
            cid: C::CONTEXT_ID,
        })
        .await?;
        info!("PDP context deactivated");
        self.lower(OperationState::GprsAttached);
        Ok(())
    }

    /// Attach, define the configured APN and activate the context.
    pub async fn connect_data(&mut self) -> Result<(), Error> {
        self.attach_gprs().await?;
        self.set_apn(&C::APN).await?;
        self.activate_pdp().await
    }

    pub async fn mqtt_connect(&mut self, broker: &Broker<'_>) -> Result<(), Error> {
        if self.state < OperationState::DataEstablished {
            warn!("Connecting to broker without an established data connection");
        }

        self.send(&Connect {
            host: broker.host,
            port: broker.port,
            client_id: broker.client_id,
            keep_alive: broker.keep_alive,
            clean_session: broker.clean_session,
        })
        .await?;
        info!("Connected to broker");
        self.raise(OperationState::BrokerConnected);
        Ok(())
    }

    pub async fn mqtt_disconnect(&mut self) -> Result<(), Error> {
        self.send(&Disconnect).await?;
        info!("Disconnected from broker");
        self.lower(OperationState::DataEstablished);
        Ok(())
    }

    /// Mark the broker connection as lost, e.g. after a
    /// [`crate::urc::Event::MqttDisconnected`].
    pub fn broker_lost(&mut self) {
        self.lower(OperationState::DataEstablished);
    }

    pub async fn subscribe(&mut self, topic: &str, qos: Qos) -> Result<(), Error> {
        self.send(&Subscribe {
            topic,
            action: SubscriptionAction::Subscribe,
            qos,
        })
        .await
    }

    pub async fn unsubscribe(&mut self, topic: &str) -> Result<(), Error> {
        self.send(&Subscribe {
            topic,
            action: SubscriptionAction::Unsubscribe,
            qos: Qos::AtMostOnce,
        })
        .await
    }

    pub async fn publish(&mut self, topic: &str, message: &str, qos: Qos) -> Result<(), Error> {
        self.send(&Publish {
            topic,
            message,
            qos,
            dup: 0,
            retain: 0,
        })
        .await
    }

    /// Result arrives as [`crate::urc::Event::SignalQuality`].
    pub async fn request_signal_quality(&mut self) -> Result<(), Error> {
        self.send(&GetSignalQuality).await
    }

    /// Result arrives as [`crate::urc::Event::Iccid`].
    pub async fn request_iccid(&mut self) -> Result<(), Error> {
        self.send(&GetCcid).await
    }

    /// Result arrives as [`crate::urc::Event::Imei`].
    pub async fn request_imei(&mut self) -> Result<(), Error> {
        self.send(&GetImei).await
    }

    pub async fn set_message_format(&mut self, format: MessageFormat) -> Result<(), Error> {
        self.send(&SetMessageFormat { format }).await
    }

    /// Result arrives as [`crate::urc::Event::SmsRead`].
    pub async fn read_sms(&mut self, index: u16) -> Result<(), Error> {
        self.send(&ReadMessage { index }).await
    }

    /// One [`crate::urc::Event::SmsList`] per stored message.
    pub async fn list_sms(&mut self, status: MessageStatus) -> Result<(), Error> {
        self.send(&ListMessages { status }).await
    }

    /// Send `text` to `number` in text mode. The message reference arrives
    /// as [`crate::urc::Event::SmsSent`].
    pub async fn send_sms(&mut self, number: &str, text: &str) -> Result<(), Error> {
        self.client.send_no_wait(&SendMessage { number }).await?;
        self.client.wait_for(b">", C::COMMAND_TIMEOUT).await?;
        self.client.write(text.as_bytes()).await?;
        self.client
            .execute(&[CTRL_Z], client::timeout::<SendMessage>())
            .await?;
        self.raise(OperationState::Alive);
        Ok(())
    }

    pub async fn delete_sms(&mut self, index: u16) -> Result<(), Error> {
        self.send(&DeleteMessage {
            index,
            flag: DeleteFlag::Index,
        })
        .await
    }
}

#[cfg(feature = "gps")]
impl<'a, IO, H, C> Modem<'a, IO, H, C>
where
    IO: Read + Write + ReadReady,
    H: EventHandler,
    C: ModemConfig<'a>,
{
    pub async fn set_gps_power(
        &mut self,
        state: crate::command::gps::types::PowerState,
    ) -> Result<(), Error> {
        self.send(&crate::command::gps::SetGpsPower { state }).await
    }

    /// NMEA reports arrive as [`crate::urc::Event::GpsData`], 0 stops them.
    pub async fn set_gps_read_interval(&mut self, interval: u16) -> Result<(), Error> {
        self.send(&crate::command::gps::SetGpsReadInterval { interval })
            .await
    }

    pub async fn set_assisted_gps(
        &mut self,
        state: crate::command::gps::types::PowerState,
    ) -> Result<(), Error> {
        self.send(&crate::command::gps::SetAssistedGps { state }).await
    }

    /// Result arrives as [`crate::urc::Event::Location`].
    pub async fn request_location(
        &mut self,
        source: crate::command::gps::types::LocationSource,
    ) -> Result<(), Error> {
        self.send(&crate::command::gps::GetLocation { source }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockSerial;
    use crate::urc::{Event, EventSender, Sms};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use embassy_time::Duration;

    struct TestConfig;

    impl ModemConfig<'static> for TestConfig {
        const APN: Apn<'static> = Apn::ip("internet");
        const COMMAND_TIMEOUT: Duration = Duration::from_millis(50);
        const READY_TIMEOUT: Duration = Duration::from_millis(50);
    }

    fn ignore(_: Event) {}

    fn modem(serial: MockSerial) -> Modem<'static, MockSerial, fn(Event), TestConfig> {
        Modem::new(serial, ignore as fn(Event), TestConfig)
    }

    const OK: &[u8] = b"\r\nOK\r\n";

    #[test]
    fn data_connection_bring_up() {
        let mut m = modem(MockSerial::new().reply(OK).reply(OK).reply(OK));

        assert_eq!(block_on(m.connect_data()), Ok(()));
        assert_eq!(m.state(), OperationState::DataEstablished);

        let (serial, _) = m.release();
        assert_eq!(
            serial.written(),
            b"AT+CGATT=1\r\nAT+CGDCONT=1,\"IP\",\"internet\"\r\nAT+CGACT=1,1\r\n"
        );
    }

    #[test]
    fn broker_session() {
        let mut m = modem(
            MockSerial::new()
                .reply(OK)
                .reply(OK)
                .reply(OK)
                .reply(OK),
        );
        let broker = Broker::new("test.mosquitto.org", 1883, "a9g");

        assert_eq!(block_on(m.mqtt_connect(&broker)), Ok(()));
        assert_eq!(m.state(), OperationState::BrokerConnected);
        assert_eq!(block_on(m.subscribe("cmd", Qos::AtMostOnce)), Ok(()));
        assert_eq!(block_on(m.publish("status", "up", Qos::ExactlyOnce)), Ok(()));
        assert_eq!(block_on(m.mqtt_disconnect()), Ok(()));
        assert_eq!(m.state(), OperationState::DataEstablished);

        let (serial, _) = m.release();
        assert_eq!(
            serial.written(),
            b"AT+MQTTCONN=\"test.mosquitto.org\",1883,\"a9g\",120,0\r\n\
              AT+MQTTSUB=\"cmd\",1,0\r\n\
              AT+MQTTPUB=\"status\",\"up\",2,0,0\r\n\
              AT+MQTTDISCONN\r\n"
        );
    }

    #[test]
    fn detach_lowers_state() {
        let mut m = modem(MockSerial::new().reply(OK).reply(OK).reply(OK));

        block_on(m.attach_gprs()).unwrap();
        block_on(m.activate_pdp()).unwrap();
        assert_eq!(m.state(), OperationState::DataEstablished);

        block_on(m.detach_gprs()).unwrap();
        assert_eq!(m.state(), OperationState::Alive);
    }

    #[test]
    fn raw_command_failure_keeps_state() {
        let mut m = modem(MockSerial::new().reply(b"\r\n+CME ERROR: 58\r\n"));

        assert_eq!(block_on(m.execute(b"AT+CGATT=1\r\n")), Err(Error::Timeout));
        assert_eq!(m.state(), OperationState::Unknown);
    }

    #[test]
    fn sms_send_waits_for_prompt() {
        let channel = Channel::<NoopRawMutex, Event, 4>::new();
        let serial = MockSerial::new()
            .reply(b"\r\n> ")
            .reply(b"\r\n+CMGS: 12\r\n\r\nOK\r\n");
        let mut m: Modem<'static, _, _, TestConfig> =
            Modem::new(serial, EventSender(channel.sender()), TestConfig);

        assert_eq!(block_on(m.send_sms("+8613800000000", "led on")), Ok(()));
        assert_eq!(channel.try_receive(), Ok(Event::SmsSent { reference: 12 }));

        let (serial, _) = m.release();
        assert_eq!(
            serial.written(),
            b"AT+CMGS=\"+8613800000000\"\rled on\x1a"
        );
    }

    #[test]
    fn echoed_read_keeps_the_message_body() {
        let channel = Channel::<NoopRawMutex, Event, 4>::new();
        let serial = MockSerial::new().reply(
            b"AT+CMGR=1\r\r\n+CMGR: \"REC READ\",\"+8613800000000\",,\"2024/01/01,12:00:00+08\"\r\nHello\r\n\r\nOK\r\n",
        );
        let mut m: Modem<'static, _, _, TestConfig> =
            Modem::new(serial, EventSender(channel.sender()), TestConfig);

        assert_eq!(block_on(m.read_sms(1)), Ok(()));
        assert_eq!(
            channel.try_receive(),
            Ok(Event::SmsRead(Sms {
                number: heapless::String::try_from("+8613800000000").unwrap(),
                timestamp: heapless::String::try_from("2024/01/01,12:00:00+08").unwrap(),
                body: heapless::String::try_from("Hello").unwrap(),
            }))
        );
        assert!(channel.try_receive().is_err());
    }

    #[test]
    fn echoed_identity_query_reports_once() {
        let channel = Channel::<NoopRawMutex, Event, 4>::new();
        let serial = MockSerial::new()
            .reply(b"AT+EGMR=2,7\r\r\n+EGMR: \"867959031234567\"\r\n\r\nOK\r\n");
        let mut m: Modem<'static, _, _, TestConfig> =
            Modem::new(serial, EventSender(channel.sender()), TestConfig);

        assert_eq!(block_on(m.request_imei()), Ok(()));
        assert_eq!(
            channel.try_receive(),
            Ok(Event::Imei(
                heapless::String::try_from("\"867959031234567\"").unwrap()
            ))
        );
        assert!(channel.try_receive().is_err());
    }

    #[test]
    fn echoed_sms_send_reports_only_the_reference() {
        let channel = Channel::<NoopRawMutex, Event, 4>::new();
        let serial = MockSerial::new()
            .reply(b"AT+CMGS=\"+8613800000000\"\r\r\n> ")
            .reply(b"led on\x1a\r\n+CMGS: 7\r\n\r\nOK\r\n");
        let mut m: Modem<'static, _, _, TestConfig> =
            Modem::new(serial, EventSender(channel.sender()), TestConfig);

        assert_eq!(block_on(m.send_sms("+8613800000000", "led on")), Ok(()));
        assert_eq!(channel.try_receive(), Ok(Event::SmsSent { reference: 7 }));
        assert!(channel.try_receive().is_err());
    }

    #[test]
    fn ready_after_boot() {
        let mut m = modem(MockSerial::new().reply(b"AT\r\r\nOK\r\n\r\nREADY\r\n"));

        assert_eq!(block_on(m.wait_for_ready()), Ok(()));
        assert_eq!(m.state(), OperationState::Alive);
    }

    #[test]
    fn ready_is_bounded() {
        let mut m = modem(MockSerial::new());

        assert_eq!(block_on(m.wait_for_ready()), Err(Error::Timeout));
        assert_eq!(m.state(), OperationState::Unknown);
    }

    #[test]
    fn query_results_reach_the_channel() {
        let channel = Channel::<NoopRawMutex, Event, 4>::new();
        let serial = MockSerial::new()
            .reply(b"\r\n+CSQ: 18,99\r\n\r\nOK\r\n")
            .reply(b"\r\n+CCID: 89860012345678901234\r\n\r\nOK\r\n");
        let mut m: Modem<'static, _, _, TestConfig> =
            Modem::new(serial, EventSender(channel.sender()), TestConfig);

        assert_eq!(block_on(m.request_signal_quality()), Ok(()));
        assert_eq!(block_on(m.request_iccid()), Ok(()));
        assert_eq!(m.state(), OperationState::Alive);

        assert_eq!(channel.try_receive(), Ok(Event::SignalQuality { value: 18 }));
        assert_eq!(
            channel.try_receive(),
            Ok(Event::Iccid(
                heapless::String::try_from("89860012345678901234").unwrap()
            ))
        );
    }
}
